//! Key-by-key diffing of mappings.

use std::collections::BTreeSet;

use super::{DiffResult, Walker};
use crate::path::PathSegment;
use crate::value::{Map, Value};

impl Walker<'_> {
    /// Compares two mappings over the union of their keys, in sorted order.
    ///
    /// Each key is routed once: mappings on both sides recurse as mappings,
    /// sequences on both sides recurse as sequences, and anything else is a
    /// leaf comparison where a missing key equals an explicit `null`.
    pub(super) fn diff_maps(&mut self, left: &Map, right: &Map) -> DiffResult<()> {
        self.check_depth()?;

        let keys: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
        for key in keys {
            match (left.get(key), right.get(key)) {
                (Some(Value::Map(a)), Some(Value::Map(b))) => {
                    self.enter(PathSegment::key(key.as_str()));
                    let result = self.diff_maps(a, b);
                    self.leave();
                    result?;
                }
                (Some(Value::List(a)), Some(Value::List(b))) => {
                    self.enter(PathSegment::key(key.as_str()));
                    let result = self.diff_lists(a, b);
                    self.leave();
                    result?;
                }
                _ => {
                    if left.get_or_null(key) != right.get_or_null(key) {
                        self.emit(PathSegment::key(key.as_str()));
                    }
                }
            }
        }

        Ok(())
    }
}
