//! Core helpers for the chainview blockchain explorer.
//! This crate owns the byte/string codec and the small pure utilities the
//! explorer views share.

pub mod codec;
pub mod config;
pub mod logging;
pub mod query;
pub mod stats;

pub use codec::{
    decode, decode_strict, decode_with, encode, encoded_len, format_bytes, parse_bytes,
    ByteFormat, CodecError, CodecResult, DecodeInput, DecodeMode,
};
pub use config::{ConfigError, ConfigResult, ExplorerConfig};
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status, LogTarget};
pub use query::{
    parse_query_string, query_part, strip_cache_buster, QueryError, QueryParams, QueryResult,
};
pub use stats::average_block_interval;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
