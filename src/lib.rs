//! URL parsing, normalization, and serialization per the WHATWG URL Living
//! Standard, for software that must agree with web browsers on URL identity.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod checkers;
mod error;
mod helpers;
mod host;
mod ipv4;
mod ipv6;
mod parser;
mod scheme;
mod unicode;
mod url;
mod url_search_params;

// Public API
pub use error::ParseError;
pub use host::Host;
pub use scheme::SchemeType;
pub use url::Url;
pub use url_search_params::UrlSearchParams;

pub type Result<T> = core::result::Result<T, ParseError>;

/// Parse an absolute URL.
///
/// # Errors
///
/// Returns an error if the input is not an absolute URL per the WHATWG URL
/// Standard.
pub fn parse(input: &str) -> Result<Url> {
    Url::parse(input, None)
}

/// Parse `input` against a base URL. An empty `base` behaves like
/// [`parse`]; a base that itself fails to parse is an error.
///
/// # Errors
///
/// Returns an error if the base or the input fails to parse.
pub fn parse_ref(base: &str, input: &str) -> Result<Url> {
    if base.is_empty() {
        return Url::parse(input, None);
    }
    Url::parse(input, Some(base))
}
