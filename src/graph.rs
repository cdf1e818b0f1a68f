//! Abstract styled graph handed to the rendering engine: nodes carry either
//! a structured label or a filled box, edges carry ports and arrow styles.
//! Layout and drawing belong to Graphviz; nothing here is geometric.

use crate::fk::ArrowStyle;

/// Layout engine variant: hierarchical for the detailed levels,
/// force-directed for the conceptual overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Dot,
    Fdp,
}

impl Engine {
    pub fn command(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Fdp => "fdp",
        }
    }
}

/// Edge routing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splines {
    Straight,
    Curved,
}

impl Splines {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "straight" => Some(Self::Straight),
            "curved" => Some(Self::Curved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Borderless node whose look comes entirely from its structured label.
    PlainRecord,
    Box,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    /// HTML-like structured label (physical/logical table nodes).
    Record { label: String },
    /// Filled colored box (conceptual table nodes and legend entries).
    Filled { fill: String, font: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub shape: NodeShape,
    pub body: NodeBody,
}

/// One end of an edge: a node and the column port to anchor on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub node: String,
    pub port: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: Port,
    pub to: Port,
    pub arrow_head: ArrowStyle,
    pub arrow_tail: ArrowStyle,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub name: String,
    pub engine: Engine,
    pub splines: Splines,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
