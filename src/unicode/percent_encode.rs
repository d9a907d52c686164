use crate::compat::{String, ToString};
use crate::error::{ParseError, Result};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// The percent-encode sets of the WHATWG URL Standard, as precomputed
// 128-bit membership tables. Non-ASCII bytes are always encoded.
// https://url.spec.whatwg.org/#percent-encoded-bytes

/// C0 control percent-encode set: bytes < 0x20 and 0x7F
pub const C0_CONTROL: &AsciiSet = CONTROLS;

/// Fragment set: C0 control + SP, `"`, `<`, `>`, `` ` ``
pub const FRAGMENT: &AsciiSet = &C0_CONTROL.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Query set: C0 control + SP, `"`, `#`, `<`, `>`
pub const QUERY: &AsciiSet = &C0_CONTROL.add(b' ').add(b'"').add(b'#').add(b'<').add(b'>');

/// Special-query set: query + `'`
pub const SPECIAL_QUERY: &AsciiSet = &QUERY.add(b'\'');

/// Path set: query + `?`, `` ` ``, `{`, `}`
pub const PATH: &AsciiSet = &QUERY.add(b'?').add(b'`').add(b'{').add(b'}');

/// Userinfo set: path + `/`, `:`, `;`, `=`, `@`, `[` through `^`, `|`
pub const USERINFO: &AsciiSet = &PATH
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Component set: userinfo + `$`, `%`, `&`, `+`, `,`
pub const COMPONENT: &AsciiSet = &USERINFO
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',');

/// Percent-encode a string with the given set into a fresh string
pub fn percent_encode_with_set(input: &str, set: &'static AsciiSet) -> String {
    utf8_percent_encode(input, set).to_string()
}

/// Percent-encode a string with the given set directly into `buffer`
pub fn percent_encode_into(buffer: &mut String, input: &str, set: &'static AsciiSet) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, set) {
        buffer.push_str(chunk);
    }
}

/// Percent-encode a single code point into `buffer`
pub fn percent_encode_char_into(buffer: &mut String, c: char, set: &'static AsciiSet) {
    let mut utf8 = [0u8; 4];
    for chunk in utf8_percent_encode(c.encode_utf8(&mut utf8), set) {
        buffer.push_str(chunk);
    }
}

/// Decode percent-escapes; lowercase hex is tolerated, stray `%` passes
/// through verbatim. Fails only when the decoded bytes are not UTF-8.
pub fn percent_decode(input: &str) -> Result<String> {
    percent_encoding::percent_decode_str(input)
        .decode_utf8()
        .map(Into::into)
        .map_err(|_| ParseError::InvalidPercentEncoding)
}
