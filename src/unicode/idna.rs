use crate::compat::String;
use crate::error::{ParseError, Result};

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if any label of the domain is Punycode (xn-- prefix, case insensitive)
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.len() < 4 {
        return false;
    }
    if is_punycode_prefix(bytes) {
        return true;
    }
    memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// UTS-46 ToASCII with the WHATWG parameter set (UseSTD3ASCIIRules=false,
/// CheckHyphens=false, Transitional_Processing=false, VerifyDnsLength=false).
///
/// Pure-ASCII domains without Punycode labels skip the table lookups
/// entirely; forbidden code points are the host parser's concern, so the
/// fast path only lowercases.
pub fn domain_to_ascii(domain: &str) -> Result<String> {
    if domain.is_ascii() && !has_punycode(domain) {
        return Ok(domain.to_ascii_lowercase());
    }
    idna::domain_to_ascii(domain).map_err(|_| ParseError::IdnaError)
}
