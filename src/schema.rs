//! The diagram aggregate: import sheets into an ordered table sequence,
//! validate it as a whole, render it at any abstraction level.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::column::ErLevel;
use crate::dot;
use crate::render::{self, RenderError, RenderOptions};
use crate::sheet::Sheet;
use crate::style::StyleConfig;
use crate::table::{Table, TableError};

/// A foreign key whose target table or column does not exist in the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{table}.{column} references unknown {target_table}.{target_column}")]
pub struct DanglingReference {
    pub table: String,
    pub column: String,
    pub target_table: String,
    pub target_column: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("duplicate table name {name:?}")]
    DuplicateTable { name: String },
    #[error("unresolved foreign key references: {}", summarize(.0))]
    DanglingReferences(Vec<DanglingReference>),
}

fn summarize(errors: &[DanglingReference]) -> String {
    errors
        .iter()
        .map(DanglingReference::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An imported schema. Only [`Schema::import`] builds one, so every value
/// in existence has passed validation; rendering is read-only and
/// repeatable, re-importing means building a new value.
#[derive(Debug, Clone)]
pub struct Schema {
    tables: Vec<Table>,
    style: StyleConfig,
}

impl Schema {
    /// Import an ordered collection of sheets. Sheets whose name does not
    /// start with a configured classification keyword are skipped; the rest
    /// become tables in sheet order. Any table-level error, duplicate table
    /// name, or dangling foreign key reference aborts the import, so no
    /// partial schema is ever observable.
    pub fn import(sheets: &[Sheet], style: StyleConfig) -> Result<Self, ImportError> {
        let mut tables: Vec<Table> = Vec::new();
        for sheet in sheets {
            let Some((classification, table_name)) = style.match_sheet_name(&sheet.name) else {
                tracing::debug!(sheet = %sheet.name, "skipping sheet without classification prefix");
                continue;
            };
            if tables.iter().any(|t| t.name == table_name) {
                return Err(ImportError::DuplicateTable { name: table_name });
            }
            tables.push(Table::from_sheet(&table_name, classification, &sheet.rows)?);
        }

        let dangling = check_references(&tables);
        if !dangling.is_empty() {
            return Err(ImportError::DanglingReferences(dangling));
        }

        tracing::info!(tables = tables.len(), "imported schema");
        Ok(Self { tables, style })
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Render the schema to `destination`: build the abstract graph for
    /// `level`, write the DOT sidecar, and run the layout engine. Returns
    /// the output path. The schema itself is untouched on any outcome.
    pub fn render_to(
        &self,
        destination: &Path,
        level: ErLevel,
        options: &RenderOptions,
    ) -> Result<PathBuf, RenderError> {
        let graph = render::build_graph(self, level, options)?;
        tracing::info!(
            ?level,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "rendering schema to {}",
            destination.display()
        );
        dot::render_file(&graph, destination)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            writeln!(f, "{table}")?;
        }
        Ok(())
    }
}

/// Validate every foreign key of every table against the table sequence,
/// collecting all dangling references instead of stopping at the first.
fn check_references(tables: &[Table]) -> Vec<DanglingReference> {
    let mut dangling = Vec::new();
    for table in tables {
        for column in &table.foreign_keys {
            let Some(fk) = &column.foreign_key else {
                continue;
            };
            let resolved = tables
                .iter()
                .find(|t| t.name == fk.referenced_table)
                .is_some_and(|target| {
                    target.all_columns().any(|c| c.name == fk.referenced_column)
                });
            if !resolved {
                dangling.push(DanglingReference {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    target_table: fk.referenced_table.clone(),
                    target_column: fk.referenced_column.clone(),
                });
            }
        }
    }
    dangling
}
