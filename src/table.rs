use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::column::{Column, ErLevel};
use crate::fk::{ForeignKey, ForeignKeyFormatError};
use crate::sheet::SheetRow;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("primary key column {table}.{column} must not be nullable")]
pub struct PrimaryKeyError {
    pub table: String,
    pub column: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    ForeignKeyFormat(#[from] ForeignKeyFormatError),
    #[error(transparent)]
    PrimaryKey(#[from] PrimaryKeyError),
}

/// Which of a table's column sequences to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    PrimaryKey,
    ForeignKey,
    Attribute,
}

/// One table of the schema. A column that is both primary key and foreign
/// key appears in `primary_keys` and `foreign_keys`; the sequences keep
/// sheet row order and are fixed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// Classification tag, always one of the style config's keys.
    pub classification: String,
    pub primary_keys: Vec<Column>,
    pub foreign_keys: Vec<Column>,
    pub attributes: Vec<Column>,
}

impl Table {
    /// Classify sheet rows into primary keys, foreign keys and plain
    /// attributes. A row with a `pk` marker is a primary key (and also a
    /// foreign key if it carries a directive); a row with a directive but
    /// no marker is a foreign key; everything else is an attribute. A
    /// malformed directive or a nullable primary key aborts the table.
    pub fn from_sheet(
        name: &str,
        classification: &str,
        rows: &[SheetRow],
    ) -> Result<Self, TableError> {
        let mut table = Self {
            name: name.to_string(),
            classification: classification.to_string(),
            primary_keys: Vec::new(),
            foreign_keys: Vec::new(),
            attributes: Vec::new(),
        };

        for row in rows {
            let mut column = Column::new(name, &row.name, &row.data_type);
            column.is_primary_key = row.pk;
            if row.pk && row.nullable {
                return Err(PrimaryKeyError {
                    table: name.to_string(),
                    column: column.name,
                }
                .into());
            }
            if let Some(directive) = &row.fk {
                column.foreign_key = Some(ForeignKey::parse(directive, name, &column.name)?);
            }

            let is_fk = column.foreign_key.is_some();
            if row.pk {
                table.primary_keys.push(column.clone());
            }
            if is_fk {
                table.foreign_keys.push(column);
            } else if !row.pk {
                table.attributes.push(column);
            }
        }

        Ok(table)
    }

    /// Columns of one role, filtered to those visible at `level`, in sheet
    /// row order.
    pub fn columns(&self, role: ColumnRole, level: ErLevel) -> impl Iterator<Item = &Column> {
        let sequence = match role {
            ColumnRole::PrimaryKey => &self.primary_keys,
            ColumnRole::ForeignKey => &self.foreign_keys,
            ColumnRole::Attribute => &self.attributes,
        };
        sequence.iter().filter(move |c| !c.is_hidden(level))
    }

    /// All columns in display order, each exactly once (PK-as-FK columns
    /// are not repeated).
    pub fn all_columns(&self) -> impl Iterator<Item = &Column> {
        self.primary_keys
            .iter()
            .chain(self.foreign_keys.iter().filter(|c| !c.is_primary_key))
            .chain(self.attributes.iter())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .all_columns()
            .map(|c| UnicodeWidthStr::width(c.name.as_str()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{} {{", self.name)?;
        for column in self.all_columns() {
            let pad = name_width - UnicodeWidthStr::width(column.name.as_str());
            writeln!(
                f,
                "    {}{} {}",
                column.name,
                " ".repeat(pad),
                column.data_type
            )?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, data_type: &str, pk: bool, fk: Option<&str>) -> SheetRow {
        SheetRow {
            name: name.to_string(),
            data_type: data_type.to_string(),
            pk,
            nullable: false,
            fk: fk.map(str::to_string),
        }
    }

    fn sample_table() -> Table {
        Table::from_sheet(
            "order_items",
            "ASSOCIATION",
            &[
                row("order_id", "int", true, Some("FK orders.id n:1")),
                row("product_id", "int", true, Some("FK products.id n:1")),
                row("quantity", "int", false, None),
                row("note:h", "varchar", false, None),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_classification_buckets() {
        let table = sample_table();
        assert_eq!(table.primary_keys.len(), 2);
        // PK-as-FK columns appear in both sequences.
        assert_eq!(table.foreign_keys.len(), 2);
        assert_eq!(table.attributes.len(), 2);
        assert!(table.foreign_keys.iter().all(|c| c.is_primary_key));
    }

    #[test]
    fn test_fk_without_pk_marker() {
        let table = Table::from_sheet(
            "orders",
            "TABLE",
            &[
                row("id", "int", true, None),
                row("customer_id", "int", false, Some("FK customers.id n:1")),
            ],
        )
        .unwrap();
        assert_eq!(table.primary_keys.len(), 1);
        assert_eq!(table.foreign_keys.len(), 1);
        assert!(table.attributes.is_empty());
        assert!(!table.foreign_keys[0].is_primary_key);
    }

    #[test]
    fn test_malformed_directive_aborts_table() {
        let err = Table::from_sheet(
            "orders",
            "TABLE",
            &[row("customer_id", "int", false, Some("FK customers"))],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::ForeignKeyFormat(_)));
    }

    #[test]
    fn test_nullable_primary_key_aborts_table() {
        let rows = [SheetRow {
            name: "id".into(),
            data_type: "int".into(),
            pk: true,
            nullable: true,
            fk: None,
        }];
        let err = Table::from_sheet("orders", "TABLE", &rows).unwrap_err();
        assert!(matches!(err, TableError::PrimaryKey(_)));
    }

    #[test]
    fn test_columns_filters_by_level() {
        let table = sample_table();
        let physical: Vec<&str> = table
            .columns(ColumnRole::Attribute, ErLevel::Physical)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(physical, vec!["quantity"]);

        let conceptual: Vec<&str> = table
            .columns(ColumnRole::Attribute, ErLevel::Conceptual)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(conceptual, vec!["quantity", "note"]);
    }

    #[test]
    fn test_all_columns_lists_each_once() {
        let table = sample_table();
        let names: Vec<&str> = table.all_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["order_id", "product_id", "quantity", "note"]);
    }

    #[test]
    fn test_display_aligns_types() {
        let table = sample_table();
        let text = table.to_string();
        assert!(text.starts_with("order_items {"));
        assert!(text.contains("order_id   int"));
        assert!(text.contains("quantity   int"));
    }
}
