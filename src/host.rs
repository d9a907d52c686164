use crate::checkers::ends_in_number;
use crate::compat::String;
use crate::error::{ParseError, Result};
use crate::ipv4::{parse_ipv4, serialize_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::unicode::idna::domain_to_ascii;
use crate::unicode::percent_encode::{C0_CONTROL, percent_decode, percent_encode_with_set};
use core::fmt;

/// The host of a URL record, kept in parsed form. The textual shape is
/// derived only at serialization time, so a host can never be re-parsed
/// through the wrong branch after a setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// An IDNA-ASCII domain name
    Domain(String),
    Ipv4(u32),
    Ipv6([u16; 8]),
    /// Percent-encoded host of a non-special URL
    Opaque(String),
    /// The empty host, as in `file:///path`
    Empty,
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(domain) => f.write_str(domain),
            Self::Ipv4(address) => f.write_str(&serialize_ipv4(*address)),
            Self::Ipv6(pieces) => write!(f, "[{}]", serialize_ipv6(pieces)),
            Self::Opaque(host) => f.write_str(host),
            Self::Empty => Ok(()),
        }
    }
}

impl Host {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Forbidden host code points; a raw occurrence fails the host parser.
fn is_forbidden_host_code_point(c: char) -> bool {
    matches!(
        c,
        '\0' | '\t'
            | '\n'
            | '\r'
            | ' '
            | '#'
            | '/'
            | ':'
            | '<'
            | '>'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '^'
            | '|'
    )
}

/// Domains additionally forbid C0 controls, `%`, and DEL.
fn is_forbidden_domain_code_point(c: char) -> bool {
    is_forbidden_host_code_point(c) || (c as u32) < 0x20 || c == '%' || c as u32 == 0x7F
}

/// Parse a host string in the given scheme context.
///
/// `[`-prefixed input is an IPv6 address; non-special schemes get an opaque
/// host; special schemes go through percent-decoding, IDNA ToASCII, and the
/// IPv4 parser when the domain ends in a number.
pub(crate) fn parse_host(input: &str, is_special: bool) -> Result<Host> {
    if input.starts_with('[') {
        let Some(inner) = input.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
            return Err(ParseError::InvalidIpv6);
        };
        return parse_ipv6(inner).map(Host::Ipv6);
    }

    if !is_special {
        return parse_opaque_host(input);
    }

    let domain = percent_decode(input)?;
    let ascii = domain_to_ascii(&domain)?;
    if ascii.is_empty() {
        return Err(ParseError::InvalidHost);
    }
    if ascii.chars().any(is_forbidden_domain_code_point) {
        return Err(ParseError::InvalidHost);
    }
    if ends_in_number(&ascii) {
        return parse_ipv4(&ascii).map(Host::Ipv4);
    }
    Ok(Host::Domain(ascii))
}

fn parse_opaque_host(input: &str) -> Result<Host> {
    if input.is_empty() {
        return Ok(Host::Empty);
    }
    if input.chars().any(is_forbidden_host_code_point) {
        return Err(ParseError::InvalidHost);
    }
    Ok(Host::Opaque(percent_encode_with_set(input, C0_CONTROL)))
}
