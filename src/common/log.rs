use std::env;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;

/// Crate targets that count as "our" logs.
const OUR_CRATES: &[&str] = &["loop_wm", "loop"];

/// A filter directive giving every one of our crates the same `level`.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    OUR_CRATES.iter().map(|t| format!("{t}={lvl}")).collect::<Vec<_>>().join(",")
}

/// Picks the filter directive, in order of precedence: an explicit `level`,
/// then `RUST_LOG`, then crate-scoped `info`.
pub fn compute_spec(level: Option<&str>) -> String {
    if let Some(lvl) = level {
        return level_spec_for(lvl);
    }
    match env::var("RUST_LOG") {
        Ok(spec) if !spec.trim().is_empty() => spec,
        _ => level_spec_for("info"),
    }
}

pub fn init_logging() { init_logging_with(None) }

/// Installs the global subscriber. Calling it again is harmless; the first
/// subscriber stays in place.
pub fn init_logging_with(level: Option<&str>) {
    let filter = EnvFilter::new(compute_spec(level));
    let tree = HierarchicalLayer::default()
        .with_indent_amount(2)
        .with_targets(true)
        .with_bracketed_fields(true);
    let _ = tracing_subscriber::registry().with(filter).with(tree).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_our_crates() {
        assert_eq!(level_spec_for("DEBUG"), "loop_wm=debug,loop=debug");
    }

    #[test]
    fn explicit_level_wins() {
        assert_eq!(compute_spec(Some("trace")), "loop_wm=trace,loop=trace");
    }
}
