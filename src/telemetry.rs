// src/telemetry.rs
//! Tracing setup and log-safe text identifiers.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "slop_detector=info,warn";
pub const ENV_LOG_JSON: &str = "SLOP_LOG_JSON";

/// Install a global subscriber. `RUST_LOG` overrides the default filter;
/// `SLOP_LOG_JSON=1` switches to JSON lines. A no-op if the host runtime
/// already installed one.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(ENV_LOG_JSON).ok().as_deref() == Some("1");

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

/// Short anonymized id for a text: first 6 bytes of its SHA-256, hex.
/// Log this instead of the raw text.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
