//! Hand-drawn outline effects: evenly spaced nodes, pushed in and out along
//! the outline's normal, joined with straight lines.
use kurbo::{ParamCurve, ParamCurveArclen, Vec2};
use rand::Rng;
use std::str::FromStr;

use crate::{
    common::{Node, NodeType},
    layer::Layer,
    shape::Path,
    KernToolsError,
};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// How nodes are displaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoughnessMode {
    /// Alternately out and in by the full amount
    Regular,
    /// By a uniformly random amount in either direction
    #[default]
    Random,
}

impl FromStr for RoughnessMode {
    type Err = KernToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(RoughnessMode::Regular),
            "random" => Ok(RoughnessMode::Random),
            other => Err(KernToolsError::InvalidParameter(format!(
                "unknown roughness mode {:?}",
                other
            ))),
        }
    }
}

/// Settings for [`roughen_layer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoughenParams {
    /// Distance between nodes after resampling
    pub spacing: f64,
    /// Maximum displacement of a node
    pub roughness: f64,
    /// How nodes are displaced
    pub mode: RoughnessMode,
}

impl RoughenParams {
    /// Non-positive spacing becomes 1 and negative roughness becomes 0.
    /// Infinite or NaN values are rejected.
    pub fn new(
        spacing: f64,
        roughness: f64,
        mode: RoughnessMode,
    ) -> Result<Self, KernToolsError> {
        if !spacing.is_finite() || !roughness.is_finite() {
            return Err(KernToolsError::InvalidParameter(format!(
                "spacing and roughness must be numbers, got {} and {}",
                spacing, roughness
            )));
        }
        Ok(RoughenParams {
            spacing: if spacing > 0.0 { spacing } else { 1.0 },
            roughness: roughness.max(0.0),
            mode,
        })
    }
}

impl Default for RoughenParams {
    fn default() -> Self {
        RoughenParams {
            spacing: 50.0,
            roughness: 10.0,
            mode: RoughnessMode::Random,
        }
    }
}

/// Add on-curve nodes so that no segment is longer than `spacing`.
///
/// A segment of length `len` gets `floor(len / spacing)` new nodes, evenly
/// spaced along its length; curves are split without changing their shape.
/// Returns the number of on-curve nodes added.
pub fn resample(path: &mut Path, spacing: f64) -> Result<usize, KernToolsError> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(KernToolsError::InvalidParameter(format!(
            "node spacing must be positive, got {}",
            spacing
        )));
    }
    let segments = path.segments()?;
    let Some(first) = segments.first() else {
        return Ok(0);
    };
    let count = path.nodes.len();
    let mut nodes = vec![path.nodes[first.start].clone()];
    let mut added = 0;
    for segment in &segments {
        let length = segment.curve.arclen(ARCLEN_ACCURACY);
        let splits = if length > spacing {
            (length / spacing).floor() as usize
        } else {
            0
        };
        if splits == 0 {
            let mut ix = (segment.start + 1) % count;
            loop {
                nodes.push(path.nodes[ix].clone());
                if ix == segment.end {
                    break;
                }
                ix = (ix + 1) % count;
            }
            continue;
        }
        let step = length / (splits + 1) as f64;
        let mut params = vec![0.0];
        for k in 1..=splits {
            params.push(segment.curve.inv_arclen(step * k as f64, ARCLEN_ACCURACY));
        }
        params.push(1.0);
        for window in params.windows(2) {
            let piece = segment.curve.subsegment(window[0]..window[1]);
            let mut piece_nodes = Path::nodes_for(&piece);
            if let Some(end) = piece_nodes.last_mut() {
                end.smooth = !matches!(end.nodetype, NodeType::Line);
            }
            nodes.extend(piece_nodes);
        }
        // Keep the segment's own end node rather than the computed copy
        if let Some(end) = nodes.last_mut() {
            *end = path.nodes[segment.end].clone();
        }
        added += splits;
    }
    if path.closed {
        // The last segment ends where the first began
        nodes.pop();
    }
    path.nodes = nodes;
    Ok(added)
}

/// Push every on-curve node along the normal of the line joining its
/// neighbours. Nodes whose neighbours coincide stay put.
pub fn roughen<R: Rng>(
    path: &mut Path,
    amount: f64,
    mode: RoughnessMode,
    rng: &mut R,
) -> Result<(), KernToolsError> {
    if !amount.is_finite() {
        return Err(KernToolsError::InvalidParameter(format!(
            "roughness must be a number, got {}",
            amount
        )));
    }
    let count = path.nodes.len();
    if amount <= 0.0 || count < 2 {
        return Ok(());
    }
    let original: Vec<kurbo::Point> = path.nodes.iter().map(Node::to_kurbo).collect();
    let mut sign = 1.0;
    for (ix, node) in path.nodes.iter_mut().enumerate() {
        if !node.is_on_curve() {
            continue;
        }
        let (prev, next) = if path.closed {
            ((ix + count - 1) % count, (ix + 1) % count)
        } else {
            (ix.saturating_sub(1), (ix + 1).min(count - 1))
        };
        let chord: Vec2 = original[next] - original[prev];
        let length = chord.hypot();
        if length == 0.0 {
            continue;
        }
        let normal = Vec2::new(-chord.y, chord.x) / length;
        let distance = match mode {
            RoughnessMode::Regular => {
                let d = amount * sign;
                sign = -sign;
                d
            }
            RoughnessMode::Random => rng.gen_range(-amount..=amount),
        };
        let moved = original[ix] + normal * distance;
        node.x = moved.x;
        node.y = moved.y;
    }
    Ok(())
}

/// Drop every handle and join the remaining nodes with straight lines.
/// Returns the number of nodes removed.
pub fn flatten(path: &mut Path) -> usize {
    let before = path.nodes.len();
    path.nodes.retain(Node::is_on_curve);
    let closed = path.closed;
    for (ix, node) in path.nodes.iter_mut().enumerate() {
        node.smooth = false;
        node.nodetype = if ix == 0 && !closed {
            NodeType::Move
        } else {
            NodeType::Line
        };
    }
    before - path.nodes.len()
}

/// Resample, roughen and flatten every path of a layer. Returns the change
/// in the number of nodes.
pub fn roughen_layer<R: Rng>(
    layer: &mut Layer,
    params: &RoughenParams,
    rng: &mut R,
) -> Result<isize, KernToolsError> {
    let mut delta = 0;
    for path in layer.paths.iter_mut() {
        let before = path.nodes.len() as isize;
        resample(path, params.spacing)?;
        roughen(path, params.roughness, params.mode, rng)?;
        flatten(path);
        delta += path.nodes.len() as isize - before;
    }
    Ok(delta)
}
