use std::fmt;
use std::str::FromStr;

use rust_i18n::t;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sorting algorithm '{0}' (expected bubble, selection or insertion)")]
pub struct ParseAlgorithmError(pub String);

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
        }
    }

    /// Localized one-paragraph explanation shown in the algorithm menu.
    pub fn description(self) -> String {
        match self {
            Algorithm::Bubble => t!("algorithm.bubble").to_string(),
            Algorithm::Selection => t!("algorithm.selection").to_string(),
            Algorithm::Insertion => t!("algorithm.insertion").to_string(),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Algorithm::Bubble => 0,
            Algorithm::Selection => 1,
            Algorithm::Insertion => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let normalized = normalized.strip_suffix(" sort").unwrap_or(&normalized);
        match normalized {
            "bubble" => Ok(Algorithm::Bubble),
            "selection" => Ok(Algorithm::Selection),
            "insertion" => Ok(Algorithm::Insertion),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_short_and_title_names() {
        assert_eq!("bubble".parse(), Ok(Algorithm::Bubble));
        assert_eq!("Selection Sort".parse(), Ok(Algorithm::Selection));
        assert_eq!("  INSERTION ".parse(), Ok(Algorithm::Insertion));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "quick".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, ParseAlgorithmError("quick".to_string()));
        assert!(err.to_string().contains("quick"));
    }

    #[test]
    fn test_cycle_wraps_both_directions() {
        assert_eq!(Algorithm::Insertion.next(), Algorithm::Bubble);
        assert_eq!(Algorithm::Bubble.prev(), Algorithm::Insertion);
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.next().prev(), algorithm);
            assert_eq!(Algorithm::from_index(algorithm.index()), Some(algorithm));
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Algorithm::Selection).unwrap();
        assert_eq!(json, "\"selection\"");
        let back: Algorithm = serde_json::from_str("\"insertion\"").unwrap();
        assert_eq!(back, Algorithm::Insertion);
    }
}
