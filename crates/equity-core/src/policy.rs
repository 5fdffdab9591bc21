//! Conflict policy for writes to an existing table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when the target table already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IfExists {
    /// Refuse the write; nothing is stored.
    #[default]
    Fail,
    /// Drop the existing table, then write the new rows.
    Replace,
    /// Add the new rows after the existing ones. Dates are not deduplicated.
    Append,
}

impl IfExists {
    pub fn as_str(&self) -> &'static str {
        match self {
            IfExists::Fail => "fail",
            IfExists::Replace => "replace",
            IfExists::Append => "append",
        }
    }
}

impl fmt::Display for IfExists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IfExists {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(IfExists::Fail),
            "replace" => Ok(IfExists::Replace),
            "append" => Ok(IfExists::Append),
            other => Err(format!(
                "invalid if-exists policy '{other}', expected 'fail', 'replace' or 'append'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for policy in [IfExists::Fail, IfExists::Replace, IfExists::Append] {
            assert_eq!(policy.to_string().parse::<IfExists>(), Ok(policy));
        }
        assert_eq!(" Append ".parse::<IfExists>(), Ok(IfExists::Append));
        assert!("upsert".parse::<IfExists>().is_err());
    }

    #[test]
    fn test_default_is_fail() {
        assert_eq!(IfExists::default(), IfExists::Fail);
    }
}
