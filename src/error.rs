/// Errors surfaced by the URL parser and the record constructors.
///
/// The WHATWG standard distinguishes recoverable validation errors from
/// failures; only failures reach callers, and they all arrive as this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The scheme is missing or malformed
    InvalidScheme,
    /// The host failed to parse (domain, opaque host, or forbidden code point)
    InvalidHost,
    /// The port is not a valid 16-bit integer
    InvalidPort,
    /// An IPv4 address octet or shape is out of range
    InvalidIpv4,
    /// An IPv6 address is malformed
    InvalidIpv6,
    /// A percent-escape decoded to invalid UTF-8
    InvalidPercentEncoding,
    /// UTS-46 ToASCII rejected the domain
    IdnaError,
    /// The URL is structurally invalid
    InvalidUrl,
    /// The input is relative but no base URL was supplied
    RelativeUrlWithoutBase,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidScheme => "invalid scheme",
            Self::InvalidHost => "invalid host",
            Self::InvalidPort => "invalid port",
            Self::InvalidIpv4 => "invalid IPv4 address",
            Self::InvalidIpv6 => "invalid IPv6 address",
            Self::InvalidPercentEncoding => "invalid percent encoding",
            Self::IdnaError => "IDNA processing failed",
            Self::InvalidUrl => "invalid URL",
            Self::RelativeUrlWithoutBase => "relative URL without a base",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Result type for URL parsing operations
pub type Result<T> = core::result::Result<T, ParseError>;
