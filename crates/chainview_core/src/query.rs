//! Request query-string helpers for node API URLs.
//!
//! # Responsibility
//! - Turn `a=1&b=2` query strings into a sorted parameter map for display.
//! - Mask secret parameters before anything is shown or logged.
//! - Remove the polling cache-buster so request URLs log stably.
//!
//! # Invariants
//! - Redacted values never appear in parse results or parse errors.
//! - Keys are kept verbatim; only values are percent-decoded.

use crate::codec::{decode_strict, CodecError};
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Value substituted for redacted parameters.
pub const REDACTED_VALUE: &str = "***";
/// Parameters redacted when no explicit list is configured.
pub const DEFAULT_REDACTED_KEYS: &[&str] = &["secretPhrase"];

static CACHE_BUSTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&random=[.\d]+").expect("valid cache buster regex"));

/// Parsed parameters sorted by key.
pub type QueryParams = BTreeMap<String, String>;

pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// `%` not followed by two hex digits. `offset` is relative to the raw value.
    MalformedEscape { key: String, offset: usize },
    /// Percent-decoded octets are not valid UTF-8.
    InvalidUtf8 { key: String, source: CodecError },
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedEscape { key, offset } => {
                write!(f, "malformed percent escape in `{key}` at offset {offset}")
            }
            Self::InvalidUtf8 { key, source } => {
                write!(f, "value of `{key}` is not valid UTF-8: {source}")
            }
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedEscape { .. } => None,
            Self::InvalidUtf8 { source, .. } => Some(source),
        }
    }
}

/// Returns the default redacted key list as owned strings.
pub fn default_redacted_keys() -> Vec<String> {
    DEFAULT_REDACTED_KEYS
        .iter()
        .map(|key| (*key).to_string())
        .collect()
}

/// Parses a query string into parameters.
///
/// Pieces that do not split into exactly `key=value` are skipped. Values
/// have `+` read as a space and are then percent-decoded. A later duplicate
/// key replaces an earlier one. Keys in `redacted_keys` get
/// [`REDACTED_VALUE`] without their raw value being decoded.
///
/// # Errors
/// - [`QueryError::MalformedEscape`] for a bad `%` escape.
/// - [`QueryError::InvalidUtf8`] when decoded octets are not UTF-8.
pub fn parse_query_string(query: &str, redacted_keys: &[String]) -> QueryResult<QueryParams> {
    let mut params = QueryParams::new();

    for piece in query.split('&') {
        let mut parts = piece.split('=');
        let (Some(key), Some(raw_value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };

        // Why: a secret must not reach a decode error message, so redacted
        // values are replaced before any decoding is attempted.
        let value = if is_redacted(key, redacted_keys) {
            REDACTED_VALUE.to_string()
        } else {
            decode_component(key, raw_value)?
        };
        params.insert(key.to_string(), value);
    }

    Ok(params)
}

/// Returns the part of `url` after the first `?`, or all of it when absent.
pub fn query_part(url: &str) -> &str {
    url.split_once('?').map_or(url, |(_, query)| query)
}

/// Removes every `&random=<n>` cache-busting parameter from `url`.
pub fn strip_cache_buster(url: &str) -> Cow<'_, str> {
    CACHE_BUSTER_RE.replace_all(url, "")
}

fn is_redacted(key: &str, redacted_keys: &[String]) -> bool {
    redacted_keys.iter().any(|redacted| redacted == key)
}

fn decode_component(key: &str, raw: &str) -> QueryResult<String> {
    if let Some(offset) = malformed_escape_offset(raw) {
        return Err(QueryError::MalformedEscape {
            key: key.to_string(),
            offset,
        });
    }

    let octets = percent_decode_str(&raw.replace('+', " ")).collect::<Vec<u8>>();
    decode_strict(&octets).map_err(|source| QueryError::InvalidUtf8 {
        key: key.to_string(),
        source,
    })
}

/// Offset of the first `%` not followed by two hex digits.
fn malformed_escape_offset(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &byte)| byte == b'%')
        .map(|(pos, _)| pos)
        .find(|&pos| {
            !bytes
                .get(pos + 1..pos + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit))
        })
}
