//! Logging setup for the OData client crates.
//!
//! Logging is controlled by environment variables.
//!
//! # Environment Variables
//!
//! - `ODATA_DEBUG=true` or `ODATA_DEBUG=1` - Enable debug logging
//! - `ODATA_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `ODATA_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use odata_filter::logging;
//!
//! // Call once at startup
//! logging::init();
//!
//! // Or with a level
//! logging::init_with_level("trace");
//! ```
//!
//! The crates log through `tracing`: compiled operations at `trace`, compile
//! calls and field replacement at `debug`, rejected user input at `warn`.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Tracing targets of the workspace crates.
pub const TARGETS: &[&str] = &["odata_kit", "odata_filter", "odata_value", "odata_entity"];

/// Check if debug logging is enabled via `ODATA_DEBUG`.
///
/// Returns `true` if `ODATA_DEBUG` is "true", "1" or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("ODATA_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `ODATA_LOG_LEVEL`.
///
/// Defaults to "debug" if `ODATA_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var("ODATA_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Get the configured log format from `ODATA_LOG_FORMAT`.
///
/// Defaults to "json".
pub fn get_log_format() -> &'static str {
    env::var("ODATA_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// `EnvFilter` directive enabling `level` for every crate in [`TARGETS`].
pub fn directive(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize logging. Subsequent calls are no-ops.
///
/// Nothing is installed unless `ODATA_DEBUG` or `ODATA_LOG_LEVEL` is set, or
/// without the `tracing-subscriber` feature.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("ODATA_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter =
                EnvFilter::try_new(directive(level)).unwrap_or_else(|_| EnvFilter::new("warn"));

            match get_log_format() {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(
                level = level,
                format = get_log_format(),
                "OData logging initialized"
            );
        }
    });
}

/// Initialize logging with a specific level.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call it early, before spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: only called at program startup before threads are spawned.
    unsafe {
        env::set_var("ODATA_LOG_LEVEL", level);
    }
    init();
}

/// Initialize debug logging; same as `ODATA_DEBUG=true` plus [`init`].
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call it early, before spawning threads.
pub fn init_debug() {
    // SAFETY: only called at program startup before threads are spawned.
    unsafe {
        env::set_var("ODATA_DEBUG", "true");
    }
    init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_disabled_by_default() {
        // SAFETY: Test runs in isolation
        unsafe {
            env::remove_var("ODATA_DEBUG");
        }
        assert!(!is_debug_enabled());
    }

    #[test]
    fn test_log_level_default() {
        // SAFETY: Test runs in isolation
        unsafe {
            env::remove_var("ODATA_DEBUG");
            env::remove_var("ODATA_LOG_LEVEL");
        }
        assert_eq!(get_log_level(), "warn");
    }

    #[test]
    fn test_directive_covers_every_crate() {
        assert_eq!(
            directive("trace"),
            "odata_kit=trace,odata_filter=trace,odata_value=trace,odata_entity=trace"
        );
    }

    #[test]
    fn test_log_format_default() {
        // SAFETY: Test runs in isolation
        unsafe {
            env::remove_var("ODATA_LOG_FORMAT");
        }
        assert_eq!(get_log_format(), "json");
    }
}
