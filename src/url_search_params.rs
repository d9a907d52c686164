use crate::compat::{String, ToString, Vec};

/// The query of a URL as an ordered list of name/value pairs, with the
/// `application/x-www-form-urlencoded` codec.
///
/// The only interface with [`crate::Url`] is the query string itself:
/// build one from [`crate::Url::query`] and apply it back through
/// [`crate::Url::set_search`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSearchParams {
    pairs: Vec<(String, String)>,
}

impl UrlSearchParams {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parse a query string, with or without the leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        if query.is_empty() {
            return Self::new();
        }
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => (decode_form(name), decode_form(value)),
                None => (decode_form(pair), String::new()),
            })
            .collect();
        Self { pairs }
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_string(), value.to_string()));
    }

    /// Delete all pairs with the given name; with `value`, only pairs
    /// matching both.
    pub fn delete(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.pairs.retain(|(n, v)| n != name || v != value),
            None => self.pairs.retain(|(n, _)| n != name),
        }
    }

    /// First value for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, name: &str, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.pairs.iter().any(|(n, v)| n == name && v == value),
            None => self.pairs.iter().any(|(n, _)| n == name),
        }
    }

    /// Set a name to a single value, replacing every existing pair with
    /// that name but keeping its first position.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut replaced = false;
        self.pairs.retain_mut(|(n, v)| {
            if n != name {
                return true;
            }
            if replaced {
                return false;
            }
            replaced = true;
            *v = value.to_string();
            true
        });
        if !replaced {
            self.pairs.push((name.to_string(), value.to_string()));
        }
    }

    /// Stable sort by name; relative value order per name is kept
    pub fn sort(&mut self) {
        self.pairs.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize without the leading `?`, ready for `Url::set_search`
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            encode_form(&mut out, name);
            out.push('=');
            encode_form(&mut out, value);
        }
        out
    }
}

impl core::fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl From<&str> for UrlSearchParams {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}

/// Form-urlencoded serializer: space becomes `+`, bytes outside
/// `[A-Za-z0-9*\-._]` become uppercase percent-escapes.
fn encode_form(out: &mut String, input: &str) {
    use core::fmt::Write;
    for byte in input.bytes() {
        match byte {
            b' ' => out.push('+'),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(byte as char);
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
}

/// Form-urlencoded decoder: `+` is a space, broken escapes pass through
fn decode_form(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                if let Ok(byte) = u8::from_str_radix(&input[i + 1..i + 3], 16) {
                    out.push(byte);
                    i += 2;
                } else {
                    out.push(b'%');
                }
            }
            byte => out.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
