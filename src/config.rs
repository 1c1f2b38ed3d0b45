//! Tree limits.

use serde::{Deserialize, Serialize};

/// Depth at which leaves stop subdividing, unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: u8 = 32;

/// What a leaf at the maximum depth does with a second occupant.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    /// Keep up to `LEAF_BUCKET_LEN` occupants in the leaf.
    Bucket,
    /// Refuse the insertion.
    Reject,
}

impl Default for Overflow {
    fn default() -> Self {
        Overflow::Bucket
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Leaves at this depth never subdivide. The root is at depth 0.
    #[serde(default = "default_max_depth")]
    pub max_depth: u8,
    #[serde(default)]
    pub overflow: Overflow,
}

fn default_max_depth() -> u8 {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            overflow: Overflow::default(),
        }
    }
}

impl Config {
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Parse a TOML table, e.g. a `[quadtree]` section a simulation passed on.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
