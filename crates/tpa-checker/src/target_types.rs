//! Types the analysis is about, resolved once per compilation.

use tpa_binder::{Compilation, TypeId};
use tracing::debug;

pub const TIME_PROVIDER: &str = "System.TimeProvider";
pub const DATE_TIME: &str = "System.DateTime";
pub const DATE_TIME_OFFSET: &str = "System.DateTimeOffset";

/// The time abstraction and the two clock-reading types of one compilation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetTypeSet {
    pub time_provider: TypeId,
    pub date_time: TypeId,
    pub date_time_offset: TypeId,
}

impl TargetTypeSet {
    /// All three types, or None when any is missing from the compilation.
    ///
    /// A compilation without them is not analyzed at all.
    pub fn resolve(compilation: &Compilation) -> Option<TargetTypeSet> {
        let lookup = |name: &str| {
            let id = compilation.get_type_by_metadata_name(name);
            if id.is_none() {
                debug!(
                    type_name = name,
                    references = ?compilation.reference_names(),
                    "target type not resolved; skipping compilation"
                );
            }
            id
        };
        Some(TargetTypeSet {
            time_provider: lookup(TIME_PROVIDER)?,
            date_time: lookup(DATE_TIME)?,
            date_time_offset: lookup(DATE_TIME_OFFSET)?,
        })
    }
}

/// Member names that read the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessorNameSets {
    pub date_time: &'static [&'static str],
    pub date_time_offset: &'static [&'static str],
}

impl AccessorNameSets {
    pub const DEFAULT: AccessorNameSets = AccessorNameSets {
        date_time: &["Now", "UtcNow", "Today"],
        date_time_offset: &["Now", "UtcNow"],
    };
}

impl Default for AccessorNameSets {
    fn default() -> Self {
        AccessorNameSets::DEFAULT
    }
}
