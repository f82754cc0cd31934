use crate::consts::DEFAULT_MERGE_TOLERANCE;

use std::{fmt::Display, path::PathBuf};

/// One input collection and how it feeds the triangulation
#[derive(Clone, Debug, PartialEq)]
pub struct SourceParameters {
    pub source: String,
    pub value: ValueSelector,
    pub role: SourceRole,
}

impl SourceParameters {
    pub fn points(source: impl Into<String>, value: ValueSelector) -> SourceParameters {
        SourceParameters {
            source: source.into(),
            value,
            role: SourceRole::Points,
        }
    }

    pub fn break_lines(source: impl Into<String>, value: ValueSelector) -> SourceParameters {
        SourceParameters {
            source: source.into(),
            value,
            role: SourceRole::BreakLines,
        }
    }
}

/// Where the scalar value of each vertex comes from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ValueSelector {
    #[default]
    Elevation,
    Field(String),
}

impl Display for ValueSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSelector::Elevation => f.write_str("Z coordinate"),
            ValueSelector::Field(name) => write!(f, "field '{name}'"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceRole {
    #[default]
    Points,
    BreakLines,
}

impl Display for SourceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceRole::Points => f.write_str("points"),
            SourceRole::BreakLines => f.write_str("break lines"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TinParameters {
    // points closer than this in the working crs are merged
    pub merge_tolerance: f64,
}

impl Default for TinParameters {
    fn default() -> Self {
        Self {
            merge_tolerance: DEFAULT_MERGE_TOLERANCE,
        }
    }
}

impl TinParameters {
    pub fn validate(&self) -> crate::Result<()> {
        if !self.merge_tolerance.is_finite() || self.merge_tolerance < 0. {
            return Err(crate::Error::Configuration(format!(
                "The merge tolerance must be a finite non-negative number, got {}",
                self.merge_tolerance
            )));
        }
        Ok(())
    }
}

/// Passed untouched to the mesh driver
#[derive(Clone, Debug, Default)]
pub struct OutputParameters {
    pub path: PathBuf,
    pub format: String,
}
