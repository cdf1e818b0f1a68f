//! Render adapter: maps an abstraction level to node shapes and a layout
//! engine, and lowers a [`Schema`] into the abstract [`Graph`] that the
//! DOT backend serializes.

use std::io;
use std::path::PathBuf;

use crate::column::ErLevel;
use crate::fk::CardinalityError;
use crate::graph::{Edge, Engine, Graph, Node, NodeBody, NodeShape, Port, Splines};
use crate::label;
use crate::schema::Schema;
use crate::style::StyleError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Cardinality(#[from] CardinalityError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error("failed to write debug label for table {table}: {source}")]
    DebugLabel { table: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("rendering engine failed: {0}")]
    Engine(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub splines: Splines,
    /// Append one legend node per configured classification.
    pub legend: bool,
    /// Write each table's label under this directory for inspection.
    pub debug_dir: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            splines: Splines::Curved,
            legend: false,
            debug_dir: None,
        }
    }
}

pub fn shape_for(level: ErLevel) -> NodeShape {
    match level {
        ErLevel::Physical | ErLevel::Logical => NodeShape::PlainRecord,
        ErLevel::Conceptual => NodeShape::Box,
    }
}

pub fn engine_for(level: ErLevel) -> Engine {
    match level {
        ErLevel::Physical | ErLevel::Logical => Engine::Dot,
        ErLevel::Conceptual => Engine::Fdp,
    }
}

/// Lower a schema to the abstract graph for `level`: one node per table,
/// one edge per foreign key column (PK-as-FK included). Conceptual nodes
/// are colored boxes labeled by table name; the detailed levels get
/// borderless record nodes with structured labels.
pub fn build_graph(
    schema: &Schema,
    level: ErLevel,
    options: &RenderOptions,
) -> Result<Graph, RenderError> {
    let style = schema.style();
    let shape = shape_for(level);

    let mut nodes = Vec::new();
    for table in schema.tables() {
        let body = if level == ErLevel::Conceptual {
            let table_style = style.table_style(&table.classification)?;
            NodeBody::Filled {
                fill: table_style.bg_color.clone(),
                font: table_style.font_color.clone(),
            }
        } else {
            let html = label::html_label(table, level, style)?;
            if let Some(dir) = &options.debug_dir {
                label::write_debug_label(dir, &table.name, &html).map_err(|source| {
                    RenderError::DebugLabel {
                        table: table.name.clone(),
                        source,
                    }
                })?;
            }
            NodeBody::Record { label: html }
        };
        nodes.push(Node {
            id: table.name.clone(),
            shape,
            body,
        });
    }

    let mut edges = Vec::new();
    for table in schema.tables() {
        for column in &table.foreign_keys {
            let Some(fk) = &column.foreign_key else {
                continue;
            };
            let bad_code = |code: &str| CardinalityError {
                table: table.name.clone(),
                column: column.name.clone(),
                code: code.to_string(),
            };
            let arrow_head = fk
                .arrow_head()
                .ok_or_else(|| bad_code(&fk.cardinality_foreign))?;
            let arrow_tail = fk
                .arrow_tail()
                .ok_or_else(|| bad_code(&fk.cardinality_own))?;
            edges.push(Edge {
                from: Port {
                    node: table.name.clone(),
                    port: column.name.clone(),
                },
                to: Port {
                    node: fk.referenced_table.clone(),
                    port: fk.referenced_column.clone(),
                },
                arrow_head,
                arrow_tail,
                color: style.arrow_color.clone(),
            });
        }
    }

    if options.legend {
        for table_style in style.table_colors.values() {
            nodes.push(Node {
                id: table_style.description.clone(),
                shape: NodeShape::Box,
                body: NodeBody::Filled {
                    fill: table_style.bg_color.clone(),
                    font: table_style.font_color.clone(),
                },
            });
        }
    }

    Ok(Graph {
        name: "Database".to_string(),
        engine: engine_for(level),
        splines: options.splines,
        nodes,
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fk::ArrowStyle;
    use crate::sheet::{Sheet, SheetRow};
    use crate::style::test_config;
    use pretty_assertions::assert_eq;

    fn row(name: &str, data_type: &str, pk: bool, fk: Option<&str>) -> SheetRow {
        SheetRow {
            name: name.to_string(),
            data_type: data_type.to_string(),
            pk,
            nullable: false,
            fk: fk.map(str::to_string),
        }
    }

    fn sheet(name: &str, rows: Vec<SheetRow>) -> Sheet {
        Sheet {
            name: name.to_string(),
            rows,
        }
    }

    fn sample_schema() -> Schema {
        let sheets = vec![
            sheet(
                "Table Customers",
                vec![row("id", "int", true, None), row("name", "varchar", false, None)],
            ),
            sheet(
                "Table Orders",
                vec![
                    row("id", "int", true, None),
                    row("customer_id", "int", false, Some("FK Customers.id n:1")),
                ],
            ),
            sheet(
                "Association OrderItems",
                vec![
                    row("order_id", "int", true, Some("FK Orders.id n:1")),
                    row("item", "varchar", true, None),
                ],
            ),
        ];
        Schema::import(&sheets, test_config()).unwrap()
    }

    #[test]
    fn test_shape_and_engine_per_level() {
        assert_eq!(shape_for(ErLevel::Physical), NodeShape::PlainRecord);
        assert_eq!(shape_for(ErLevel::Logical), NodeShape::PlainRecord);
        assert_eq!(shape_for(ErLevel::Conceptual), NodeShape::Box);
        assert_eq!(engine_for(ErLevel::Physical), Engine::Dot);
        assert_eq!(engine_for(ErLevel::Conceptual), Engine::Fdp);
    }

    #[test]
    fn test_one_node_per_table_one_edge_per_fk() {
        let schema = sample_schema();
        let graph = build_graph(&schema, ErLevel::Physical, &RenderOptions::default()).unwrap();

        assert_eq!(graph.nodes.len(), 3);
        // customer_id plus the PK-as-FK order_id.
        assert_eq!(graph.edges.len(), 2);

        let edge = &graph.edges[0];
        assert_eq!(edge.from.node, "Orders");
        assert_eq!(edge.from.port, "customer_id");
        assert_eq!(edge.to.node, "Customers");
        assert_eq!(edge.to.port, "id");
        assert_eq!(edge.arrow_head, ArrowStyle::Tee);
        assert_eq!(edge.arrow_tail, ArrowStyle::Crow);
        assert_eq!(edge.color, "#444444");
    }

    #[test]
    fn test_conceptual_nodes_are_colored_boxes() {
        let schema = sample_schema();
        let graph = build_graph(&schema, ErLevel::Conceptual, &RenderOptions::default()).unwrap();

        for node in &graph.nodes {
            assert_eq!(node.shape, NodeShape::Box);
            assert!(matches!(node.body, NodeBody::Filled { .. }));
        }
        // Edges are still drawn at the conceptual level.
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.engine, Engine::Fdp);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let schema = sample_schema();
        let options = RenderOptions::default();
        let first = build_graph(&schema, ErLevel::Physical, &options).unwrap();
        let second = build_graph(&schema, ErLevel::Physical, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_cardinality_fails_at_render() {
        let sheets = vec![
            sheet("Table Customers", vec![row("id", "int", true, None)]),
            sheet(
                "Table Orders",
                vec![row("customer_id", "int", false, Some("FK Customers.id 2:1"))],
            ),
        ];
        let schema = Schema::import(&sheets, test_config()).unwrap();
        match build_graph(&schema, ErLevel::Physical, &RenderOptions::default()).unwrap_err() {
            RenderError::Cardinality(err) => {
                assert_eq!(err.table, "Orders");
                assert_eq!(err.column, "customer_id");
                assert_eq!(err.code, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_legend_nodes_follow_config_order() {
        let schema = sample_schema();
        let options = RenderOptions {
            legend: true,
            ..RenderOptions::default()
        };
        let graph = build_graph(&schema, ErLevel::Conceptual, &options).unwrap();
        let legend: Vec<&str> = graph.nodes[3..].iter().map(|n| n.id.as_str()).collect();
        assert_eq!(legend, vec!["Entity table", "Association table"]);
    }

    #[test]
    fn test_debug_labels_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let debug_dir = dir.path().join("debug");
        let schema = sample_schema();
        let options = RenderOptions {
            debug_dir: Some(debug_dir.clone()),
            ..RenderOptions::default()
        };
        build_graph(&schema, ErLevel::Physical, &options).unwrap();
        assert!(debug_dir.join("Customers.html").is_file());
        assert!(debug_dir.join("Orders.html").is_file());
        assert!(debug_dir.join("OrderItems.html").is_file());
    }
}
