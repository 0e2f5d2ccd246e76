//! Series key - identity of one plotted line

use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite identity that separates one plotted line from another.
///
/// Query metrics group by dataset (`N`, `d`). The build-time metric plots
/// against `N`, so its lines are keyed by dimensionality alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKey {
    /// Dataset size and dimensionality.
    Dataset {
        /// Number of indexed vectors
        n: u64,
        /// Vector dimensionality
        d: u32,
    },
    /// Dimensionality only.
    Dimension {
        /// Vector dimensionality
        d: u32,
    },
}

impl SeriesKey {
    /// Fragment embedded in per-key file names, e.g. `N10000_d384`.
    ///
    /// Both values appear verbatim so distinct keys never share a name.
    #[must_use]
    pub fn file_stem(&self) -> String {
        match self {
            Self::Dataset { n, d } => format!("N{n}_d{d}"),
            Self::Dimension { d } => format!("d{d}"),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dataset { n, d } => write!(f, "N={n}, d={d}"),
            Self::Dimension { d } => write!(f, "d={d}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(SeriesKey::Dataset { n: 10, d: 4 }.to_string(), "N=10, d=4");
        assert_eq!(SeriesKey::Dimension { d: 768 }.to_string(), "d=768");
    }

    #[test]
    fn test_file_stems_do_not_collide() {
        // N=1, d=23 vs N=12, d=3 would collide without separators.
        let a = SeriesKey::Dataset { n: 1, d: 23 };
        let b = SeriesKey::Dataset { n: 12, d: 3 };
        assert_ne!(a.file_stem(), b.file_stem());
        assert_eq!(a.file_stem(), "N1_d23");
    }
}
