use crate::{
    common::{Node, NodeType},
    KernToolsError,
};
use kurbo::{CubicBez, Line, PathSeg, QuadBez};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// A path in a glyph
pub struct Path {
    /// A list of nodes in the path
    pub nodes: Vec<Node>,
    /// Whether the path is closed
    pub closed: bool,
}

/// One outline segment, between two on-curve nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Index of the on-curve node the segment starts at
    pub start: usize,
    /// Index of the on-curve node the segment ends at
    pub end: usize,
    /// The segment's geometry
    pub curve: PathSeg,
}

impl Path {
    /// A path with the given nodes
    pub fn new(nodes: Vec<Node>, closed: bool) -> Self {
        Path { nodes, closed }
    }

    /// Split the path into segments, in outline order.
    ///
    /// A closed path's last segment wraps round to its first on-curve node.
    /// More than two handles between on-curve nodes is a [`KernToolsError::BadPath`].
    pub fn segments(&self) -> Result<Vec<Segment>, KernToolsError> {
        let on_curve: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_on_curve())
            .map(|(ix, _)| ix)
            .collect();
        let count = self.nodes.len();
        let pairs: Vec<(usize, usize)> = if self.closed {
            on_curve
                .iter()
                .zip(on_curve.iter().cycle().skip(1))
                .map(|(a, b)| (*a, *b))
                .collect()
        } else {
            on_curve.windows(2).map(|w| (w[0], w[1])).collect()
        };
        let mut segments = Vec::with_capacity(pairs.len());
        for (start, end) in pairs {
            let mut handles = vec![];
            let mut ix = (start + 1) % count;
            while ix != end {
                handles.push(self.nodes[ix].to_kurbo());
                ix = (ix + 1) % count;
            }
            let p0 = self.nodes[start].to_kurbo();
            let p3 = self.nodes[end].to_kurbo();
            let curve = match handles.as_slice() {
                [] => PathSeg::Line(Line::new(p0, p3)),
                [p1] => PathSeg::Quad(QuadBez::new(p0, *p1, p3)),
                [p1, p2] => PathSeg::Cubic(CubicBez::new(p0, *p1, *p2, p3)),
                _ => return Err(KernToolsError::BadPath),
            };
            segments.push(Segment { start, end, curve });
        }
        Ok(segments)
    }

    /// Nodes which continue the outline with `curve`: its handles, then its end point
    pub(crate) fn nodes_for(curve: &PathSeg) -> Vec<Node> {
        match curve {
            PathSeg::Line(line) => vec![Node::from_kurbo(line.p1, NodeType::Line)],
            PathSeg::Quad(quad) => vec![
                Node::from_kurbo(quad.p1, NodeType::OffCurve),
                Node::from_kurbo(quad.p2, NodeType::QCurve),
            ],
            PathSeg::Cubic(cubic) => vec![
                Node::from_kurbo(cubic.p1, NodeType::OffCurve),
                Node::from_kurbo(cubic.p2, NodeType::OffCurve),
                Node::from_kurbo(cubic.p3, NodeType::Curve),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn square() -> Path {
        Path::new(
            vec![
                Node::new(0.0, 0.0, NodeType::Line),
                Node::new(0.0, 100.0, NodeType::Line),
                Node::new(100.0, 100.0, NodeType::Line),
                Node::new(100.0, 0.0, NodeType::Line),
            ],
            true,
        )
    }

    #[test]
    fn test_closed_path_wraps() {
        let segments = square().segments().unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!((segments[3].start, segments[3].end), (3, 0));
    }

    #[test]
    fn test_open_path_does_not_wrap() {
        let mut path = square();
        path.closed = false;
        path.nodes[0].nodetype = NodeType::Move;
        assert_eq!(path.segments().unwrap().len(), 3);
    }

    #[test]
    fn test_curve_segment() {
        let path = Path::new(
            vec![
                Node::new(0.0, 0.0, NodeType::Line),
                Node::new(0.0, 50.0, NodeType::OffCurve),
                Node::new(50.0, 100.0, NodeType::OffCurve),
                Node::new(100.0, 100.0, NodeType::Curve),
            ],
            true,
        );
        let segments = path.segments().unwrap();
        assert_eq!(segments.len(), 2);
        assert!(matches!(segments[0].curve, PathSeg::Cubic(_)));
        assert!(matches!(segments[1].curve, PathSeg::Line(_)));
    }

    #[test]
    fn test_too_many_handles() {
        let path = Path::new(
            vec![
                Node::new(0.0, 0.0, NodeType::Line),
                Node::new(0.0, 50.0, NodeType::OffCurve),
                Node::new(10.0, 50.0, NodeType::OffCurve),
                Node::new(50.0, 100.0, NodeType::OffCurve),
                Node::new(100.0, 100.0, NodeType::Curve),
            ],
            true,
        );
        assert!(matches!(path.segments(), Err(KernToolsError::BadPath)));
    }
}
