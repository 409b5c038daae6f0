use rand::{rngs::StdRng, SeedableRng};

use crate::{
    filters::FontFilter,
    roughen::{roughen_layer, RoughenParams, RoughnessMode},
};

/// A filter that gives every outline a rough, hand-drawn edge
///
/// Outlines are resampled to evenly spaced nodes, the nodes pushed in and
/// out, and the result joined with straight lines.
pub struct Roughen {
    params: RoughenParams,
    seed: Option<u64>,
}

impl Roughen {
    /// Create a new Roughen filter. With a seed, random roughness is repeatable.
    pub fn new(params: RoughenParams, seed: Option<u64>) -> Self {
        Roughen { params, seed }
    }
}

impl FontFilter for Roughen {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        log::info!(
            "Roughening outlines: spacing {}, roughness {}, {:?}",
            self.params.spacing,
            self.params.roughness,
            self.params.mode
        );
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut total = 0;
        for glyph in font.glyphs.iter_mut() {
            for layer in glyph.layers.iter_mut() {
                let delta = roughen_layer(layer, &self.params, &mut rng)?;
                log::debug!("{}: {:+} nodes", glyph.name, delta);
                total += delta;
            }
        }
        log::info!("Node count changed by {:+}", total);
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        let bad = || {
            crate::KernToolsError::InvalidParameter(format!(
                "expected SPACING,ROUGHNESS[,MODE[,SEED]], got {:?}",
                s
            ))
        };
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let (spacing, roughness) = match parts.as_slice() {
            [spacing, roughness, ..] => (
                spacing.parse::<f64>().map_err(|_| bad())?,
                roughness.parse::<f64>().map_err(|_| bad())?,
            ),
            _ => return Err(bad()),
        };
        let mode = match parts.get(2) {
            Some(mode) => mode.parse::<RoughnessMode>()?,
            None => RoughnessMode::default(),
        };
        let seed = match parts.get(3) {
            Some(seed) => Some(seed.parse::<u64>().map_err(|_| bad())?),
            None => None,
        };
        if parts.len() > 4 {
            return Err(bad());
        }
        Ok(Roughen::new(RoughenParams::new(spacing, roughness, mode)?, seed))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("roughen")
            .long("roughen")
            .help("Roughen outlines: node spacing, roughness, then optionally 'regular' or 'random' and a seed")
            .value_name("SPACING,ROUGHNESS[,MODE[,SEED]]")
            .action(clap::ArgAction::Append)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::{Node, NodeType},
        shape::Path,
        Font, Layer,
    };
    use pretty_assertions::assert_eq;

    fn font() -> Font {
        let mut font = Font::with_glyphs(["o"]);
        let mut layer = Layer::for_master(500.0, "m01");
        layer.paths.push(Path::new(
            vec![
                Node::new(0.0, 0.0, NodeType::Line),
                Node::new(0.0, 100.0, NodeType::Line),
                Node::new(100.0, 100.0, NodeType::Line),
                Node::new(100.0, 0.0, NodeType::Line),
            ],
            true,
        ));
        font.glyphs[0].layers.push(layer);
        font
    }

    #[test]
    fn test_parse() {
        let filter = Roughen::from_str("-5, 3, regular, 42").unwrap();
        assert_eq!(filter.params.spacing, 1.0);
        assert_eq!(filter.params.mode, RoughnessMode::Regular);
        assert_eq!(filter.seed, Some(42));
        assert!(Roughen::from_str("10").is_err());
        assert!(Roughen::from_str("10,2,wobbly").is_err());
        assert!(Roughen::from_str("10,inf").is_err());
    }

    #[test]
    fn test_seeded_runs_match() {
        let mut a = font();
        let mut b = font();
        let filter = Roughen::from_str("25,6,random,9").unwrap();
        filter.apply(&mut a).unwrap();
        filter.apply(&mut b).unwrap();
        assert_eq!(a.glyphs[0].layers, b.glyphs[0].layers);
        assert_eq!(a.glyphs[0].layers[0].paths[0].nodes.len(), 20);
    }
}
