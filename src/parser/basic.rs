use super::State;
use crate::checkers::{
    is_normalized_windows_drive_letter, is_windows_drive_letter, parse_port,
    starts_with_windows_drive_letter,
};
use crate::compat::{Cow, String, ToString, Vec};
use crate::error::{ParseError, Result};
use crate::helpers::{strip_tab_and_newline, trim_c0_and_space};
use crate::host::{Host, parse_host};
use crate::scheme::{SchemeType, get_scheme_type};
use crate::unicode::percent_encode::{
    C0_CONTROL, FRAGMENT, PATH, QUERY, SPECIAL_QUERY, USERINFO, percent_encode_char_into,
    percent_encode_into,
};
use crate::url::{Path, Url};

fn is_single_dot(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

fn is_double_dot(segment: &str) -> bool {
    segment == ".."
        || segment.eq_ignore_ascii_case(".%2e")
        || segment.eq_ignore_ascii_case("%2e.")
        || segment.eq_ignore_ascii_case("%2e%2e")
}

/// The basic URL parser.
///
/// Drives the WHATWG state machine over `input`, one code point at a time.
/// `base` supplies the record for relative resolution; `url` is a
/// pre-existing record being modified; `state_override` re-enters the
/// machine at a setter entry state. With an override, any failure is
/// returned before `url` observes a partial write, so callers can commit
/// the result only on success.
pub(crate) fn basic_parse(
    raw_input: &str,
    base: Option<&Url>,
    url: Option<Url>,
    state_override: Option<State>,
) -> Result<Url> {
    let has_override = state_override.is_some();
    let mut url = url.unwrap_or_default();

    // Input preprocessing: trim C0/space and drop tab/newline; in override
    // mode nothing is trimmed but NUL is dropped as well.
    let cleaned: Cow<'_, str> = if has_override {
        if raw_input.contains(['\0', '\t', '\n', '\r']) {
            Cow::Owned(
                raw_input
                    .chars()
                    .filter(|c| !matches!(c, '\0' | '\t' | '\n' | '\r'))
                    .collect(),
            )
        } else {
            Cow::Borrowed(raw_input)
        }
    } else {
        strip_tab_and_newline(trim_c0_and_space(raw_input))
    };

    let input: Vec<char> = cleaned.chars().collect();
    let len = input.len() as i64;

    let peek = |p: i64, offset: i64| -> Option<char> {
        let idx = p + 1 + offset;
        if idx >= 0 && idx < len {
            Some(input[idx as usize])
        } else {
            None
        }
    };
    let substring_from = |p: i64| -> &[char] {
        let start = p.max(0) as usize;
        input.get(start..).unwrap_or(&[])
    };

    let mut state = state_override.unwrap_or(State::SchemeStart);
    let mut buffer = String::new();
    let mut at_sign_seen = false;
    let mut inside_brackets = false;
    let mut password_token_seen = false;
    // i64 so the "decrease pointer by 1" transitions can park it before the
    // first code point; reads clamp to the valid range.
    let mut pointer: i64 = 0;

    loop {
        let c: Option<char> = if pointer >= 0 && pointer < len {
            Some(input[pointer as usize])
        } else {
            None
        };

        match state {
            State::SchemeStart => {
                if let Some(ch) = c
                    && ch.is_ascii_alphabetic()
                {
                    buffer.push(ch.to_ascii_lowercase());
                    state = State::Scheme;
                } else if !has_override {
                    state = State::NoScheme;
                    pointer -= 1;
                } else {
                    return Err(ParseError::InvalidScheme);
                }
            }

            State::Scheme => match c {
                Some(ch) if ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.') => {
                    buffer.push(ch.to_ascii_lowercase());
                }
                Some(':') => {
                    let candidate_type = get_scheme_type(&buffer);
                    if has_override {
                        if url.scheme_type.is_special() != candidate_type.is_special() {
                            return Err(ParseError::InvalidScheme);
                        }
                        if (url.has_credentials() || url.port.is_some()) && buffer == "file" {
                            return Err(ParseError::InvalidScheme);
                        }
                        if url.scheme == "file" && matches!(url.host, None | Some(Host::Empty)) {
                            return Err(ParseError::InvalidScheme);
                        }
                    }
                    url.scheme = core::mem::take(&mut buffer);
                    url.scheme_type = candidate_type;
                    if has_override {
                        if url.port == url.scheme_type.default_port() {
                            url.port = None;
                        }
                        return Ok(url);
                    }
                    if url.scheme == "file" {
                        state = State::File;
                    } else if url.is_special() && base.is_some_and(|b| b.scheme == url.scheme) {
                        state = State::SpecialRelativeOrAuthority;
                    } else if url.is_special() {
                        state = State::SpecialAuthoritySlashes;
                    } else if peek(pointer, 0) == Some('/') {
                        state = State::PathOrAuthority;
                        pointer += 1;
                    } else {
                        url.path = Path::Opaque(String::new());
                        state = State::OpaquePath;
                    }
                }
                _ => {
                    if has_override {
                        return Err(ParseError::InvalidScheme);
                    }
                    // Not a scheme after all; start over as a relative URL
                    buffer.clear();
                    state = State::NoScheme;
                    pointer = -1;
                }
            },

            State::NoScheme => {
                let Some(base_url) = base else {
                    return Err(ParseError::RelativeUrlWithoutBase);
                };
                if base_url.has_opaque_path() {
                    if c != Some('#') {
                        return Err(ParseError::RelativeUrlWithoutBase);
                    }
                    url.scheme = base_url.scheme.clone();
                    url.scheme_type = base_url.scheme_type;
                    url.path = base_url.path.clone();
                    url.query = base_url.query.clone();
                    url.fragment = Some(String::new());
                    state = State::Fragment;
                } else if base_url.scheme != "file" {
                    state = State::Relative;
                    pointer -= 1;
                } else {
                    state = State::File;
                    pointer -= 1;
                }
            }

            State::SpecialRelativeOrAuthority => {
                if c == Some('/') && peek(pointer, 0) == Some('/') {
                    state = State::SpecialAuthorityIgnoreSlashes;
                    pointer += 1;
                } else {
                    state = State::Relative;
                    pointer -= 1;
                }
            }

            State::PathOrAuthority => {
                if c == Some('/') {
                    state = State::Authority;
                } else {
                    state = State::Path;
                    pointer -= 1;
                }
            }

            State::Relative => {
                let Some(base_url) = base else {
                    return Err(ParseError::RelativeUrlWithoutBase);
                };
                url.scheme = base_url.scheme.clone();
                url.scheme_type = base_url.scheme_type;
                if c == Some('/') || (url.is_special() && c == Some('\\')) {
                    state = State::RelativeSlash;
                } else {
                    url.username = base_url.username.clone();
                    url.password = base_url.password.clone();
                    url.host = base_url.host.clone();
                    url.port = base_url.port;
                    url.path = base_url.path.clone();
                    url.query = base_url.query.clone();
                    if c == Some('?') {
                        url.query = Some(String::new());
                        state = State::Query;
                    } else if c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    } else if c.is_some() {
                        url.query = None;
                        url.shorten_path();
                        state = State::Path;
                        pointer -= 1;
                    }
                }
            }

            State::RelativeSlash => {
                if url.is_special() && matches!(c, Some('/') | Some('\\')) {
                    state = State::SpecialAuthorityIgnoreSlashes;
                } else if c == Some('/') {
                    state = State::Authority;
                } else {
                    let Some(base_url) = base else {
                        return Err(ParseError::RelativeUrlWithoutBase);
                    };
                    url.username = base_url.username.clone();
                    url.password = base_url.password.clone();
                    url.host = base_url.host.clone();
                    url.port = base_url.port;
                    state = State::Path;
                    pointer -= 1;
                }
            }

            State::SpecialAuthoritySlashes => {
                state = State::SpecialAuthorityIgnoreSlashes;
                if c == Some('/') && peek(pointer, 0) == Some('/') {
                    pointer += 1;
                } else {
                    pointer -= 1;
                }
            }

            State::SpecialAuthorityIgnoreSlashes => {
                if !matches!(c, Some('/') | Some('\\')) {
                    state = State::Authority;
                    pointer -= 1;
                }
            }

            State::Authority => {
                if c == Some('@') {
                    if at_sign_seen {
                        buffer.insert_str(0, "%40");
                    }
                    at_sign_seen = true;
                    for ch in buffer.chars() {
                        if ch == ':' && !password_token_seen {
                            password_token_seen = true;
                            continue;
                        }
                        let target = if password_token_seen {
                            &mut url.password
                        } else {
                            &mut url.username
                        };
                        percent_encode_char_into(target, ch, USERINFO);
                    }
                    buffer.clear();
                } else if matches!(c, None | Some('/') | Some('?') | Some('#'))
                    || (url.is_special() && c == Some('\\'))
                {
                    if at_sign_seen && buffer.is_empty() {
                        return Err(ParseError::InvalidHost);
                    }
                    // Rewind to re-parse the buffered code points as a host
                    pointer -= buffer.chars().count() as i64 + 1;
                    buffer.clear();
                    state = State::Host;
                } else if let Some(ch) = c {
                    buffer.push(ch);
                }
            }

            State::Host | State::Hostname => {
                if has_override && url.scheme == "file" {
                    pointer -= 1;
                    state = State::FileHost;
                } else if c == Some(':') && !inside_brackets {
                    if buffer.is_empty() {
                        return Err(ParseError::InvalidHost);
                    }
                    if state_override == Some(State::Hostname) {
                        return Err(ParseError::InvalidHost);
                    }
                    url.host = Some(parse_host(&buffer, url.is_special())?);
                    buffer.clear();
                    state = State::Port;
                } else if matches!(c, None | Some('/') | Some('?') | Some('#'))
                    || (url.is_special() && c == Some('\\'))
                {
                    pointer -= 1;
                    if url.is_special() && buffer.is_empty() {
                        return Err(ParseError::InvalidHost);
                    }
                    if has_override
                        && buffer.is_empty()
                        && (url.has_credentials() || url.port.is_some())
                    {
                        return Ok(url);
                    }
                    url.host = Some(parse_host(&buffer, url.is_special())?);
                    buffer.clear();
                    state = State::PathStart;
                    if has_override {
                        return Ok(url);
                    }
                } else if let Some(ch) = c {
                    if ch == '[' {
                        inside_brackets = true;
                    } else if ch == ']' {
                        inside_brackets = false;
                    }
                    buffer.push(ch);
                }
            }

            State::Port => match c {
                Some(ch) if ch.is_ascii_digit() => buffer.push(ch),
                _ if matches!(c, None | Some('/') | Some('?') | Some('#'))
                    || (url.is_special() && c == Some('\\'))
                    || has_override =>
                {
                    if !buffer.is_empty() {
                        let Some(port) = parse_port(&buffer) else {
                            return Err(ParseError::InvalidPort);
                        };
                        url.port = if url.scheme_type.default_port() == Some(port) {
                            None
                        } else {
                            Some(port)
                        };
                        buffer.clear();
                    }
                    if has_override {
                        return Ok(url);
                    }
                    state = State::PathStart;
                    pointer -= 1;
                }
                _ => return Err(ParseError::InvalidPort),
            },

            State::File => {
                url.scheme = "file".to_string();
                url.scheme_type = SchemeType::File;
                url.host = Some(Host::Empty);
                if matches!(c, Some('/') | Some('\\')) {
                    state = State::FileSlash;
                } else if let Some(base_url) = base.filter(|b| b.scheme == "file") {
                    url.host = base_url.host.clone();
                    url.path = base_url.path.clone();
                    url.query = base_url.query.clone();
                    if c == Some('?') {
                        url.query = Some(String::new());
                        state = State::Query;
                    } else if c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    } else if c.is_some() {
                        url.query = None;
                        if starts_with_windows_drive_letter(substring_from(pointer)) {
                            // A drive letter in the input discards the base path
                            url.path = Path::Segments(Vec::new());
                        } else {
                            url.shorten_path();
                        }
                        state = State::Path;
                        pointer -= 1;
                    }
                } else {
                    state = State::Path;
                    pointer -= 1;
                }
            }

            State::FileSlash => {
                if matches!(c, Some('/') | Some('\\')) {
                    state = State::FileHost;
                } else {
                    if let Some(base_url) = base.filter(|b| b.scheme == "file") {
                        url.host = base_url.host.clone();
                        if !starts_with_windows_drive_letter(substring_from(pointer))
                            && let Path::Segments(segments) = &base_url.path
                            && let Some(first) = segments.first()
                            && is_normalized_windows_drive_letter(first)
                        {
                            // The base's drive letter survives rootless inputs
                            url.push_path_segment(first.clone());
                        }
                    }
                    state = State::Path;
                    pointer -= 1;
                }
            }

            State::FileHost => {
                if matches!(c, None | Some('/') | Some('\\') | Some('?') | Some('#')) {
                    pointer -= 1;
                    if !has_override && is_windows_drive_letter(&buffer) {
                        // Not a host after all; the buffer continues as a path
                        state = State::Path;
                    } else if buffer.is_empty() {
                        url.host = Some(Host::Empty);
                        if has_override {
                            return Ok(url);
                        }
                        state = State::PathStart;
                    } else {
                        let mut host = parse_host(&buffer, url.is_special())?;
                        if matches!(&host, Host::Domain(d) if d == "localhost") {
                            host = Host::Empty;
                        }
                        url.host = Some(host);
                        if has_override {
                            return Ok(url);
                        }
                        buffer.clear();
                        state = State::PathStart;
                    }
                } else if let Some(ch) = c {
                    buffer.push(ch);
                }
            }

            State::PathStart => {
                if url.is_special() {
                    state = State::Path;
                    if !matches!(c, Some('/') | Some('\\')) {
                        pointer -= 1;
                    }
                } else if !has_override && c == Some('?') {
                    url.query = Some(String::new());
                    state = State::Query;
                } else if !has_override && c == Some('#') {
                    url.fragment = Some(String::new());
                    state = State::Fragment;
                } else if c.is_some() {
                    state = State::Path;
                    if c != Some('/') {
                        pointer -= 1;
                    }
                } else if has_override && url.host.is_none() {
                    url.push_path_segment(String::new());
                }
            }

            State::Path => {
                let at_boundary = matches!(c, None | Some('/'))
                    || (url.is_special() && c == Some('\\'))
                    || (!has_override && matches!(c, Some('?') | Some('#')));
                if at_boundary {
                    let at_separator = c == Some('/') || (url.is_special() && c == Some('\\'));
                    if is_double_dot(&buffer) {
                        url.shorten_path();
                        if !at_separator {
                            url.push_path_segment(String::new());
                        }
                    } else if is_single_dot(&buffer) {
                        if !at_separator {
                            url.push_path_segment(String::new());
                        }
                    } else {
                        if url.scheme == "file"
                            && url.path_is_empty()
                            && is_windows_drive_letter(&buffer)
                        {
                            // file path position 0: normalize `C|` to `C:`
                            buffer.replace_range(1..2, ":");
                        }
                        url.push_path_segment(core::mem::take(&mut buffer));
                    }
                    buffer.clear();
                    if c == Some('?') {
                        url.query = Some(String::new());
                        state = State::Query;
                    } else if c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    }
                } else if let Some(ch) = c {
                    percent_encode_char_into(&mut buffer, ch, PATH);
                }
            }

            State::OpaquePath => {
                if c == Some('?') {
                    url.query = Some(String::new());
                    state = State::Query;
                } else if c == Some('#') {
                    url.fragment = Some(String::new());
                    state = State::Fragment;
                } else if let Some(ch) = c
                    && let Path::Opaque(path) = &mut url.path
                {
                    percent_encode_char_into(path, ch, C0_CONTROL);
                }
            }

            State::Query => {
                if (!has_override && c == Some('#')) || c.is_none() {
                    let set = if url.is_special() { SPECIAL_QUERY } else { QUERY };
                    let query = url.query.get_or_insert_with(String::new);
                    percent_encode_into(query, &buffer, set);
                    buffer.clear();
                    if c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    }
                } else if let Some(ch) = c {
                    buffer.push(ch);
                }
            }

            State::Fragment => {
                if let Some(ch) = c {
                    let fragment = url.fragment.get_or_insert_with(String::new);
                    percent_encode_char_into(fragment, ch, FRAGMENT);
                }
            }
        }

        if c.is_none() && pointer >= len {
            break;
        }
        pointer += 1;
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Url> {
        basic_parse(input, None, None, None)
    }

    #[test]
    fn test_scheme_normalization() {
        let url = parse("HtTpS://Example.COM").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.hostname(), "example.com");
    }

    #[test]
    fn test_dot_segment_collapsing() {
        assert_eq!(
            parse("http://h/a/b/../c").unwrap().pathname(),
            "/a/c"
        );
        assert_eq!(parse("http://h/a/./b").unwrap().pathname(), "/a/b");
        assert_eq!(parse("http://h/a/..").unwrap().pathname(), "/");
        assert_eq!(parse("http://h/%2e%2E/a").unwrap().pathname(), "/a");
        assert_eq!(parse("http://h/a/.%2e").unwrap().pathname(), "/");
    }

    #[test]
    fn test_backslash_is_a_separator_for_special_schemes() {
        assert_eq!(parse("http://h\\a\\b").unwrap().pathname(), "/a/b");
        assert_eq!(parse("non-special://h/a\\b").unwrap().pathname(), "/a\\b");
    }

    #[test]
    fn test_authority_uses_last_at_sign() {
        let url = parse("http://a@b@c/").unwrap();
        assert_eq!(url.username(), "a%40b");
        assert_eq!(url.hostname(), "c");
    }

    #[test]
    fn test_empty_credentials_are_dropped() {
        let url = parse("http://:@example.com/").unwrap();
        assert_eq!(url.username(), "");
        assert_eq!(url.password(), "");
        assert_eq!(url.href(false), "http://example.com/");
    }

    #[test]
    fn test_tab_and_newline_stripping() {
        let url = parse("ht\ntp://exa\tmple.com/pa\rth").unwrap();
        assert_eq!(url.href(false), "http://example.com/path");
    }

    #[test]
    fn test_base_shortcut_for_opaque_base() {
        let base = parse("mailto:someone@example.net").unwrap();
        let url = basic_parse("#frag", Some(&base), None, None).unwrap();
        assert_eq!(url.href(false), "mailto:someone@example.net#frag");
        assert!(basic_parse("x", Some(&base), None, None).is_err());
    }

    #[test]
    fn test_double_slash_path_gets_marker() {
        let base = parse("web+demo:/.//not-a-host/").unwrap();
        assert_eq!(base.pathname(), "//not-a-host/");
        assert_eq!(base.href(false), "web+demo:/.//not-a-host/");
    }

    #[test]
    fn test_port_elision_and_limits() {
        assert_eq!(parse("http://h:80/").unwrap().port(), "");
        assert_eq!(parse("http://h:8080/").unwrap().port(), "8080");
        assert!(parse("http://h:65536/").is_err());
        assert!(parse("http://h:port/").is_err());
    }

    #[test]
    fn test_file_drive_letters() {
        assert_eq!(parse("file:///C:/foo").unwrap().href(false), "file:///C:/foo");
        assert_eq!(parse("file:C|/foo").unwrap().href(false), "file:///C:/foo");
        assert_eq!(parse("file:/C:/foo").unwrap().href(false), "file:///C:/foo");
        assert_eq!(parse("file://C:/foo").unwrap().href(false), "file:///C:/foo");
    }

    #[test]
    fn test_file_localhost() {
        assert_eq!(
            parse("file://localhost/etc/hosts").unwrap().href(false),
            "file:///etc/hosts"
        );
    }

    #[test]
    fn test_file_base_drive_letter_survives() {
        let base = parse("file:///C:/dir/file").unwrap();
        let url = basic_parse("/other", Some(&base), None, None).unwrap();
        assert_eq!(url.href(false), "file:///C:/other");
    }

    #[test]
    fn test_fragment_only_keeps_query() {
        let base = parse("http://h/p?q=1").unwrap();
        let url = basic_parse("#f", Some(&base), None, None).unwrap();
        assert_eq!(url.href(false), "http://h/p?q=1#f");
    }

    #[test]
    fn test_query_only_drops_fragment() {
        let base = parse("http://h/p?old#frag").unwrap();
        let url = basic_parse("?new", Some(&base), None, None).unwrap();
        assert_eq!(url.href(false), "http://h/p?new");
    }
}
