//! Structured node labels for the detailed levels: a Graphviz HTML-like
//! table with a colored header and one row per visible column. Each column
//! row carries a `PORT` attribute so edges can anchor on the exact column.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::column::{Column, ErLevel};
use crate::style::{StyleConfig, StyleError};
use crate::table::Table;

/// Build the HTML-like label for a table at the physical or logical level.
/// Physical adds a data-type cell colored per `TYPE_COLOR`; logical shows
/// column names only. The conceptual level never calls this.
pub fn html_label(
    table: &Table,
    level: ErLevel,
    style: &StyleConfig,
) -> Result<String, StyleError> {
    let table_style = style.table_style(&table.classification)?;
    let with_types = level == ErLevel::Physical;
    let header_span = if with_types { 2 } else { 1 };

    let mut html = String::new();
    html.push_str(r#"<TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0" CELLPADDING="4">"#);
    html.push('\n');
    writeln!(
        &mut html,
        r#"<TR><TD COLSPAN="{}" BGCOLOR="{}"><FONT COLOR="{}"><B>{}</B></FONT></TD></TR>"#,
        header_span,
        escape_html(&table_style.bg_color),
        escape_html(&table_style.font_color),
        escape_html(&table.name)
    )
    .unwrap();

    for column in table.all_columns() {
        if column.is_hidden(level) {
            continue;
        }
        let mut row = String::new();
        write!(
            &mut row,
            r#"<TR><TD PORT="{}" ALIGN="LEFT">{}</TD>"#,
            escape_html(&column.name),
            decorate_name(column)
        )
        .unwrap();
        if with_types {
            write!(
                &mut row,
                r#"<TD BGCOLOR="{}" ALIGN="LEFT">{}</TD>"#,
                escape_html(style.type_color(&column.data_type)?),
                escape_html(&column.data_type)
            )
            .unwrap();
        }
        row.push_str("</TR>");
        html.push_str(&row);
        html.push('\n');
    }

    html.push_str("</TABLE>");
    Ok(html)
}

/// Primary keys are bold and underlined, foreign keys italic; a PK that is
/// also a FK gets both.
fn decorate_name(column: &Column) -> String {
    let mut name = escape_html(&column.name);
    if column.foreign_key.is_some() {
        name = format!("<I>{name}</I>");
    }
    if column.is_primary_key {
        name = format!("<B><U>{name}</U></B>");
    }
    name
}

/// Write one table's label under `dir` for inspection, creating the
/// directory on demand. The file is opened, written and closed here.
pub fn write_debug_label(dir: &Path, table_name: &str, label: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{table_name}.html"));
    fs::write(&path, label)?;
    Ok(path)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
