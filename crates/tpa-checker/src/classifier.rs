//! Recognizing static-now accessors.

use tpa_binder::{Symbol, TypeTable};

use crate::target_types::{AccessorNameSets, TargetTypeSet};

/// Decides whether a resolved member reads the clock through one of the
/// designated static accessors.
#[derive(Clone, Copy, Debug)]
pub struct StaticAccessClassifier<'n> {
    names: &'n AccessorNameSets,
    /// Require `DateTimeOffset` members to be declared on `DateTimeOffset`
    /// and named in its accessor set. Without it a property matches when
    /// either half holds: every `DateTimeOffset` property, and every
    /// property named `Now` or `UtcNow` on any type.
    strict_offset_accessors: bool,
}

impl<'n> StaticAccessClassifier<'n> {
    pub fn new(names: &'n AccessorNameSets, strict_offset_accessors: bool) -> Self {
        StaticAccessClassifier {
            names,
            strict_offset_accessors,
        }
    }

    pub fn classify(&self, symbol: &Symbol, targets: &TargetTypeSet) -> bool {
        if !symbol.is_property_like() {
            return false;
        }
        let Some(declaring_type) = symbol.containing_type else {
            return false;
        };
        let name = symbol.name.as_str();
        if declaring_type == targets.date_time {
            return self.names.date_time.contains(&name);
        }
        let offset_type = declaring_type == targets.date_time_offset;
        let offset_name = self.names.date_time_offset.contains(&name);
        if self.strict_offset_accessors {
            offset_type && offset_name
        } else {
            offset_type || offset_name
        }
    }
}

/// `DateTime.Now`: simple name of the declaring type, then the member name.
pub fn qualified_property_name(types: &TypeTable, symbol: &Symbol) -> String {
    match symbol.containing_type {
        Some(owner) => format!("{}.{}", types.simple_name(owner), symbol.name),
        None => symbol.name.clone(),
    }
}
