//! Tracing configuration for the `tpa` binary.
//!
//! Output format is selected with `TPA_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! TPA_LOG=debug TPA_LOG_FORMAT=tree tpa src/
//! TPA_LOG="tpa_checker=trace" tpa Program.cs
//! ```
//!
//! The subscriber is only installed when `TPA_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "TPA_LOG";
/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "TPA_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `TPA_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `TPA_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with reported diagnostics.
pub fn init_tracing() {
    let has_tpa_log = std::env::var(LOG_ENV).is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_tpa_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
