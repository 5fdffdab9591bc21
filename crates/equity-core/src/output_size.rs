//! Output size selector for daily series requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much history a daily series request returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    /// The latest 100 observations.
    Compact,
    /// Every observation available for the equity.
    #[default]
    Full,
}

impl OutputSize {
    /// Query-string value for this size.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(OutputSize::Compact),
            "full" => Ok(OutputSize::Full),
            other => Err(format!(
                "invalid output size '{other}', expected 'compact' or 'full'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        assert_eq!(OutputSize::default(), OutputSize::Full);
    }

    #[test]
    fn test_parse() {
        assert_eq!("compact".parse::<OutputSize>(), Ok(OutputSize::Compact));
        assert_eq!("FULL".parse::<OutputSize>(), Ok(OutputSize::Full));
        assert!("weekly".parse::<OutputSize>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&OutputSize::Compact).unwrap();
        assert_eq!(json, r#""compact""#);
        let size: OutputSize = serde_json::from_str(r#""full""#).unwrap();
        assert_eq!(size, OutputSize::Full);
    }
}
