/// IPv4 address parser supporting decimal, octal, and hexadecimal octets,
/// per the WHATWG URL Standard host parser.
use crate::compat::{String, Vec, format};
use crate::error::{ParseError, Result};

/// Parse an IPv4 address string into a u32.
///
/// Accepted shapes, one to four dot-separated parts with an optional
/// trailing dot:
/// - decimal: `192.168.1.1`
/// - hex: `0xC0A80101`
/// - octal: `0300.0250.01.01`
/// - mixed: `192.0x00A80001`
pub fn parse_ipv4(input: &str) -> Result<u32> {
    // A single trailing dot is allowed and dropped
    let input = input.strip_suffix('.').unwrap_or(input);

    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() > 4 {
        return Err(ParseError::InvalidIpv4);
    }

    // A lone empty part is zero; empty parts among several fail below
    if parts.len() == 1 && parts[0].is_empty() {
        return Ok(0);
    }

    let numbers: Vec<u64> = parts
        .iter()
        .map(|part| parse_ipv4_number(part))
        .collect::<Result<Vec<_>>>()?;

    // The last number fills the remaining bytes and must fit in them
    let count = numbers.len();
    let last = numbers[count - 1];
    if last >= 256u64.pow((5 - count) as u32) {
        return Err(ParseError::InvalidIpv4);
    }

    // Every preceding number is a single byte
    if numbers[..count - 1].iter().any(|&n| n >= 256) {
        return Err(ParseError::InvalidIpv4);
    }

    let mut address: u32 = 0;
    for (i, &number) in numbers[..count - 1].iter().enumerate() {
        address |= (number as u32) << ((3 - i) * 8);
    }
    address |= last as u32;

    Ok(address)
}

/// Parse a single IPv4 part. Radix is selected by prefix: `0x`/`0X` is hex,
/// a leading `0` is octal, anything else decimal.
pub(crate) fn parse_ipv4_number(input: &str) -> Result<u64> {
    if input.is_empty() {
        return Err(ParseError::InvalidIpv4);
    }

    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        // A bare "0x" is zero
        return if hex.is_empty() {
            Ok(0)
        } else {
            u64::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidIpv4)
        };
    }

    if input.len() >= 2 && input.starts_with('0') {
        return u64::from_str_radix(input, 8).map_err(|_| ParseError::InvalidIpv4);
    }

    input.parse::<u64>().map_err(|_| ParseError::InvalidIpv4)
}

/// Serialize an IPv4 address to dotted decimal notation
pub fn serialize_ipv4(address: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (address >> 24) & 0xFF,
        (address >> 16) & 0xFF,
        (address >> 8) & 0xFF,
        address & 0xFF
    )
}
