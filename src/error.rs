//! Error type shared by the model, transforms, generator, and readers.

use std::fmt;

use thiserror::Error;

use crate::models::ArcKey;

/// Section of an instance file, used to locate parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Nodes,
    Arcs,
    Commodities,
    Solution,
    Paths,
    Consolidations,
    VariableCosts,
    TspMatrix,
    TspWindows,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Nodes => "NODES",
            Section::Arcs => "ARCS",
            Section::Commodities => "COMMODITIES",
            Section::Solution => "cost",
            Section::Paths => "PATHS",
            Section::Consolidations => "CONSOLIDATIONS",
            Section::VariableCosts => "variable_costs",
            Section::TspMatrix => "distance matrix",
            Section::TspWindows => "time windows",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum InstanceError {
    #[error("arc {0} has no transit time")]
    MissingArc(ArcKey),

    #[error("{kind} references arc {arc} which is not in the network")]
    UnknownArc { kind: &'static str, arc: ArcKey },

    #[error("arc {arc} has invalid transit time {time}")]
    InvalidTransitTime { arc: ArcKey, time: f64 },

    #[error("granularity must be finite and positive, got {0}")]
    InvalidGranularity(f64),

    #[error("scale factor must be finite and positive, got {0}")]
    InvalidScaleFactor(f64),

    #[error("invalid {name} range [{lower}, {upper}]")]
    InvalidRange {
        name: &'static str,
        lower: f64,
        upper: f64,
    },

    #[error("no reachable origin/destination pair for commodity {commodity} after {attempts} attempts")]
    UnreachablePair { commodity: usize, attempts: usize },

    #[error("unknown node {0:?}")]
    UnknownNode(String),

    #[error("invalid {section} section at line {line}: {message}")]
    Parse {
        section: Section,
        line: usize,
        message: String,
    },

    #[error("missing {0} section")]
    MissingSection(Section),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InstanceError {
    pub(crate) fn parse(section: Section, line: usize, message: impl Into<String>) -> Self {
        InstanceError::Parse {
            section,
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InstanceError>;
