//! Options controlling a diff run.

use serde::{Deserialize, Serialize};

/// DiffOptions configures a [`Differ`](super::Differ).
///
/// Options can be built in code or loaded from a YAML/JSON document:
///
/// ```yaml
/// maxDepth: 64
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DiffOptions {
    /// Deepest container nesting the differ will descend into before failing
    /// with [`DiffError::DepthLimitExceeded`](super::DiffError::DepthLimitExceeded).
    /// The root container sits at depth 0. `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Parses options from YAML (JSON is accepted as well).
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
