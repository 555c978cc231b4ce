pub mod ai;

pub use ai::{AiConfig, ProviderConfig, ProviderKind};

/// Upper bound on accepted input length (chars) at the HTTP boundary.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 100_000;
pub const ENV_MAX_CONTENT_CHARS: &str = "SLOP_MAX_CONTENT_CHARS";

/// `$SLOP_MAX_CONTENT_CHARS` if it parses to a positive number, else the default.
pub fn max_content_chars() -> usize {
    parse_max_content_chars(std::env::var(ENV_MAX_CONTENT_CHARS).ok())
}

fn parse_max_content_chars(raw: Option<String>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_CONTENT_CHARS)
}
