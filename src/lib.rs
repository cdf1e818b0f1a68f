pub mod column;
pub mod dot;
pub mod fk;
pub mod graph;
pub mod label;
pub mod render;
pub mod schema;
pub mod sheet;
pub mod style;
pub mod table;

use std::path::{Path, PathBuf};

pub use column::{Column, ErLevel, Visibility};
pub use fk::{ArrowStyle, CardinalityError, ForeignKey, ForeignKeyFormatError};
pub use graph::{Engine, Graph, Splines};
pub use render::{RenderError, RenderOptions};
pub use schema::{DanglingReference, ImportError, Schema};
pub use sheet::{Sheet, SheetError, SheetRow, load_workbook};
pub use style::{StyleConfig, StyleError};
pub use table::{ColumnRole, PrimaryKeyError, Table, TableError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Run the whole pipeline: load the style config and workbook, import the
/// schema, render it to `destination` at the requested level.
pub fn generate_diagram(
    workbook: &Path,
    config: &Path,
    destination: &Path,
    level: ErLevel,
    options: &RenderOptions,
) -> Result<PathBuf, Error> {
    let style = StyleConfig::from_yaml_file(config)?;
    let sheets = sheet::load_workbook(workbook)?;
    let schema = Schema::import(&sheets, style)?;
    Ok(schema.render_to(destination, level, options)?)
}
