use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
/// The role of a point in a path
pub enum NodeType {
    /// Starts an open path
    Move,
    /// Ends a straight segment
    Line,
    /// A bezier handle
    OffCurve,
    /// Ends a cubic segment
    Curve,
    /// Ends a quadratic segment
    QCurve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A point in a path
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// What kind of point this is
    pub nodetype: NodeType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    /// Whether the curve is smooth through this point
    pub smooth: bool,
}

impl Node {
    /// A sharp node
    pub fn new(x: f64, y: f64, nodetype: NodeType) -> Self {
        Node {
            x,
            y,
            nodetype,
            smooth: false,
        }
    }

    /// A sharp node at a kurbo point
    pub fn from_kurbo(point: kurbo::Point, nodetype: NodeType) -> Self {
        Node::new(point.x, point.y, nodetype)
    }

    /// Whether this node lies on the outline
    pub fn is_on_curve(&self) -> bool {
        self.nodetype != NodeType::OffCurve
    }

    /// The node's position as a kurbo point
    pub fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}
