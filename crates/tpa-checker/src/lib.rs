//! Static time-access analysis.
//!
//! Flags reads of the system clock through `DateTime` and `DateTimeOffset`
//! static accessors and, when a `TimeProvider` is reachable from the
//! access, names the binding that should be used instead.
//!
//! - `target_types` - the per-compilation gate (`TargetTypeSet`)
//! - `classifier` - is a member access one of the static-now accessors
//! - `scope_resolver` - closest reachable `TimeProvider` binding
//! - `finding` - analysis results and their diagnostics
//! - `code_fix` - rewrites through the reachable provider
//! - `analyzer` - drives the above over a compilation

pub mod analyzer;
pub mod cancellation;
pub mod classifier;
pub mod code_fix;
pub mod finding;
pub mod options;
pub mod scope_resolver;
pub mod target_types;

pub use analyzer::{AnalysisResult, TimeProviderAnalyzer};
pub use cancellation::CancellationToken;
pub use classifier::StaticAccessClassifier;
pub use code_fix::{CodeFix, TextEdit, apply_edits, code_fix_for, edits_by_file};
pub use finding::Finding;
pub use options::{AnalyzerOptions, is_generated_file};
pub use scope_resolver::{Binding, BindingKind, ScopeResolver, is_time_provider_type};
pub use target_types::{AccessorNameSets, TargetTypeSet};

#[cfg(test)]
#[path = "../tests/test_utils.rs"]
mod test_utils;

#[cfg(test)]
#[path = "../tests/classifier_tests.rs"]
mod classifier_tests;

#[cfg(test)]
#[path = "../tests/scope_resolver_tests.rs"]
mod scope_resolver_tests;

#[cfg(test)]
#[path = "../tests/analyzer_tests.rs"]
mod analyzer_tests;

#[cfg(test)]
#[path = "../tests/code_fix_tests.rs"]
mod code_fix_tests;

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;
