//! DOT backend: serialize the abstract graph to Graphviz text, write the
//! `.gv` sidecar, and run the layout engine to produce the output file.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::graph::{Graph, NodeBody, NodeShape, Splines};
use crate::render::RenderError;

pub fn to_dot(graph: &Graph) -> String {
    let mut out = String::new();

    writeln!(out, "digraph {} {{", quote(&graph.name)).unwrap();
    writeln!(out, "    concentrate=true;").unwrap();
    writeln!(out, "    rankdir=LR;").unwrap();
    writeln!(out, "    overlap=scale;").unwrap();
    writeln!(out, "    splines={};", splines_attr(graph.splines)).unwrap();

    for node in &graph.nodes {
        match &node.body {
            NodeBody::Record { label } => writeln!(
                out,
                "    {} [shape={}, label=<{}>];",
                quote(&node.id),
                shape_attr(node.shape),
                label
            )
            .unwrap(),
            NodeBody::Filled { fill, font } => writeln!(
                out,
                "    {} [shape={}, style=filled, fillcolor={}, fontcolor={}];",
                quote(&node.id),
                shape_attr(node.shape),
                quote(fill),
                quote(font)
            )
            .unwrap(),
        }
    }

    for edge in &graph.edges {
        writeln!(
            out,
            "    {}:{} -> {}:{} [dir=both, arrowhead={}, arrowtail={}, color={}];",
            quote(&edge.from.node),
            quote(&edge.from.port),
            quote(&edge.to.node),
            quote(&edge.to.port),
            edge.arrow_head.as_str(),
            edge.arrow_tail.as_str(),
            quote(&edge.color)
        )
        .unwrap();
    }

    out.push_str("}\n");
    out
}

fn splines_attr(splines: Splines) -> &'static str {
    match splines {
        Splines::Straight => "line",
        Splines::Curved => "true",
    }
}

fn shape_attr(shape: NodeShape) -> &'static str {
    match shape {
        NodeShape::PlainRecord => "none",
        NodeShape::Box => "box",
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Write `<destination stem>.gv` and invoke the graph's engine binary to
/// produce `destination`; the output format comes from the destination
/// extension (`pdf` if it has none). Returns the output path.
pub fn render_file(graph: &Graph, destination: &Path) -> Result<PathBuf, RenderError> {
    let text = to_dot(graph);
    let gv_path = destination.with_extension("gv");
    fs::write(&gv_path, &text).map_err(|source| RenderError::Io {
        path: gv_path.clone(),
        source,
    })?;

    let format = destination
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("pdf")
        .to_ascii_lowercase();
    let command = graph.engine.command();
    let output = Command::new(command)
        .arg(format!("-T{format}"))
        .arg(&gv_path)
        .arg("-o")
        .arg(destination)
        .output()
        .map_err(|source| RenderError::Engine(format!("failed to run `{command}`: {source}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RenderError::Engine(format!(
            "`{command}` exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(destination.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fk::ArrowStyle;
    use crate::graph::{Edge, Engine, Node, Port};

    fn sample_graph() -> Graph {
        Graph {
            name: "Database".to_string(),
            engine: Engine::Dot,
            splines: Splines::Curved,
            nodes: vec![
                Node {
                    id: "Orders".to_string(),
                    shape: NodeShape::PlainRecord,
                    body: NodeBody::Record {
                        label: "<TABLE></TABLE>".to_string(),
                    },
                },
                Node {
                    id: "Entity table".to_string(),
                    shape: NodeShape::Box,
                    body: NodeBody::Filled {
                        fill: "#2d6a9f".to_string(),
                        font: "#ffffff".to_string(),
                    },
                },
            ],
            edges: vec![Edge {
                from: Port {
                    node: "Orders".to_string(),
                    port: "customer_id".to_string(),
                },
                to: Port {
                    node: "Customers".to_string(),
                    port: "id".to_string(),
                },
                arrow_head: ArrowStyle::Tee,
                arrow_tail: ArrowStyle::Crow,
                color: "#444444".to_string(),
            }],
        }
    }

    #[test]
    fn test_dot_graph_attributes() {
        let dot = to_dot(&sample_graph());
        assert!(dot.starts_with("digraph \"Database\" {"));
        assert!(dot.contains("concentrate=true;"));
        assert!(dot.contains("rankdir=LR;"));
        assert!(dot.contains("splines=true;"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_straight_splines_map_to_line() {
        let graph = Graph {
            splines: Splines::Straight,
            ..sample_graph()
        };
        assert!(to_dot(&graph).contains("splines=line;"));
    }

    #[test]
    fn test_record_and_filled_nodes() {
        let dot = to_dot(&sample_graph());
        assert!(dot.contains(r#""Orders" [shape=none, label=<<TABLE></TABLE>>];"#));
        assert!(dot.contains(
            r##""Entity table" [shape=box, style=filled, fillcolor="#2d6a9f", fontcolor="#ffffff"];"##
        ));
    }

    #[test]
    fn test_edges_use_ports_and_arrow_styles() {
        let dot = to_dot(&sample_graph());
        assert!(dot.contains(
            r##""Orders":"customer_id" -> "Customers":"id" [dir=both, arrowhead=tee, arrowtail=crow, color="#444444"];"##
        ));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b"#), r#""a\"b""#);
        assert_eq!(quote(r"a\b"), r#""a\\b""#);
    }

    #[test]
    fn test_render_file_writes_gv_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out.pdf");
        // The engine binary may not exist here; the sidecar must be written
        // either way.
        let _ = render_file(&sample_graph(), &destination);
        let gv = fs::read_to_string(dir.path().join("out.gv")).unwrap();
        assert!(gv.starts_with("digraph"));
    }
}
