//! Tree traversal strategy selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How a tree render resolves visibility.
///
/// `Eager` walks the whole hierarchy once; `Lazy` resolves a single level
/// below one requested folder for on-demand expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStrategy {
    /// Full depth-first traversal from the root.
    #[default]
    #[serde(alias = "full")]
    Eager,
    /// Single-level expansion of one folder.
    #[serde(alias = "sequential")]
    Lazy,
}

impl RenderStrategy {
    /// Return the strategy as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Lazy => "lazy",
        }
    }
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RenderStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eager" | "full" => Ok(Self::Eager),
            "lazy" | "sequential" => Ok(Self::Lazy),
            _ => Err(AppError::validation(format!(
                "Invalid render strategy: '{s}'. Expected one of: eager, lazy"
            ))),
        }
    }
}
