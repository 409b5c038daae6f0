use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::KernToolsError;

/// Options shared by the kerning transfer operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Scale applied to transferred values, in percent
    pub percentage: f64,
    /// Replace values already present at the destination
    pub overwrite: bool,
    /// Log each pair as it is processed
    pub debug_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            percentage: 100.0,
            overwrite: false,
            debug_mode: false,
        }
    }
}

impl Config {
    /// Percentages above this are refused
    pub const MAX_PERCENTAGE: f64 = 200.0;

    /// Check the settings before anything is written
    pub fn validate(&self) -> Result<(), KernToolsError> {
        if !self.percentage.is_finite()
            || self.percentage <= 0.0
            || self.percentage > Self::MAX_PERCENTAGE
        {
            return Err(KernToolsError::InvalidParameter(format!(
                "percentage must be above 0 and at most {}, got {}",
                Self::MAX_PERCENTAGE,
                self.percentage
            )));
        }
        Ok(())
    }

    /// The percentage as a multiplier
    pub fn factor(&self) -> f64 {
        self.percentage / 100.0
    }

    /// Read a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KernToolsError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: Config = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the compact form `<percentage>[,overwrite][,debug]`.
    ///
    /// An empty string gives the defaults.
    pub fn parse(s: &str) -> Result<Self, KernToolsError> {
        let mut config = Config::default();
        let mut parts = s.split(',').map(str::trim);
        if let Some(first) = parts.next().filter(|p| !p.is_empty()) {
            config.percentage = parse_percentage(first)?;
        }
        for flag in parts {
            match flag {
                "overwrite" => config.overwrite = true,
                "debug" => config.debug_mode = true,
                "" => {}
                other => {
                    return Err(KernToolsError::InvalidParameter(format!(
                        "unknown option {:?}",
                        other
                    )))
                }
            }
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parse a percentage, with or without a trailing `%`
pub fn parse_percentage(s: &str) -> Result<f64, KernToolsError> {
    let trimmed = s.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| KernToolsError::InvalidParameter(format!("not a percentage: {:?}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults_from_json() {
        let config: Config = serde_json::from_str(r#"{"debugMode": true}"#).unwrap();
        assert_eq!(
            config,
            Config {
                percentage: 100.0,
                overwrite: false,
                debug_mode: true
            }
        );
        assert_eq!(config.factor(), 1.0);
    }

    #[rstest]
    #[case("", 100.0, false, false)]
    #[case("70", 70.0, false, false)]
    #[case("85%,overwrite", 85.0, true, false)]
    #[case("120, debug, overwrite", 120.0, true, true)]
    fn test_parse(
        #[case] input: &str,
        #[case] percentage: f64,
        #[case] overwrite: bool,
        #[case] debug_mode: bool,
    ) {
        assert_eq!(
            Config::parse(input).unwrap(),
            Config {
                percentage,
                overwrite,
                debug_mode
            }
        );
    }

    #[rstest]
    #[case("abc")]
    #[case("0")]
    #[case("-5")]
    #[case("201")]
    #[case("NaN")]
    #[case("70,sideways")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(matches!(
            Config::parse(input),
            Err(KernToolsError::InvalidParameter(_))
        ));
    }
}
