use tpa_common::diagnostics::diagnostic_codes;
use tpa_common::{Diagnostic, Location};

/// Result of analyzing one clock-reading member access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    /// No `TimeProvider` is reachable.
    StaticTime {
        location: Location,
        /// `DateTime.Now`
        property_name: String,
    },
    StaticTimeWithProviderInScope {
        location: Location,
        property_name: String,
        /// Name of the reachable binding.
        provider_name: String,
    },
}

impl Finding {
    pub fn code(&self) -> u32 {
        match self {
            Finding::StaticTime { .. } => diagnostic_codes::USE_OF_STATIC_TIME,
            Finding::StaticTimeWithProviderInScope { .. } => {
                diagnostic_codes::USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE
            }
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Finding::StaticTime { location, .. }
            | Finding::StaticTimeWithProviderInScope { location, .. } => location,
        }
    }

    pub fn property_name(&self) -> &str {
        match self {
            Finding::StaticTime { property_name, .. }
            | Finding::StaticTimeWithProviderInScope { property_name, .. } => property_name,
        }
    }

    pub fn provider_name(&self) -> Option<&str> {
        match self {
            Finding::StaticTime { .. } => None,
            Finding::StaticTimeWithProviderInScope { provider_name, .. } => Some(provider_name),
        }
    }

    /// Message arguments in template order: the provider (when any) comes
    /// before the property.
    pub fn arguments(&self) -> Vec<&str> {
        match self {
            Finding::StaticTime { property_name, .. } => vec![property_name],
            Finding::StaticTimeWithProviderInScope {
                property_name,
                provider_name,
                ..
            } => vec![provider_name, property_name],
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let location = self.location();
        Diagnostic::from_code(
            location.file_path.clone(),
            location.span.start,
            location.span.len(),
            self.code(),
            &self.arguments(),
        )
    }
}
