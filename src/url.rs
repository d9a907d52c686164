use crate::checkers::is_normalized_windows_drive_letter;
use crate::compat::{String, ToString, Vec, format};
use crate::error::Result;
use crate::host::Host;
use crate::parser::{State, basic_parse};
use crate::scheme::SchemeType;
use crate::unicode::percent_encode::{USERINFO, percent_encode_into};
use core::fmt;
use core::fmt::Write;

/// The path of a URL record: a list of segments, or one opaque string for
/// cannot-be-a-base URLs (non-special schemes whose input lacks `//`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Path {
    Segments(Vec<String>),
    Opaque(String),
}

impl Default for Path {
    fn default() -> Self {
        Self::Segments(Vec::new())
    }
}

/// A parsed URL record per the WHATWG URL Standard.
///
/// Records are created by [`crate::parse`] / [`crate::parse_ref`], mutated
/// only through setters (each of which re-enters the parser), and
/// serialized on demand. All strings are owned; a record borrows nothing
/// from its input.
///
/// # Examples
///
/// ```
/// let url = weburl::parse("HTTP://u:p@Example.COM:80/foo?q=1#bar")?;
/// assert_eq!(url.href(false), "http://u:p@example.com/foo?q=1#bar");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.decoded_port(), Some(80));
/// # Ok::<(), weburl::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Url {
    pub(crate) scheme: String,
    pub(crate) scheme_type: SchemeType,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) host: Option<Host>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Path,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl Url {
    /// Parse a URL string with an optional base URL string.
    ///
    /// # Errors
    ///
    /// Returns an error when the base or the input fails to parse per the
    /// WHATWG URL Standard.
    pub fn parse(input: &str, base: Option<&str>) -> Result<Self> {
        match base {
            Some(base) if !base.is_empty() => {
                let base_url = basic_parse(base, None, None, None)?;
                basic_parse(input, Some(&base_url), None, None)
            }
            _ => basic_parse(input, None, None, None),
        }
    }

    /// Check whether a URL string parses, without keeping the record
    pub fn can_parse(input: &str, base: Option<&str>) -> bool {
        Self::parse(input, base).is_ok()
    }

    // Accessors

    /// Serialize the record. `exclude_fragment` drops the `#fragment`
    /// suffix, which is what crawlers compare on.
    pub fn href(&self, exclude_fragment: bool) -> String {
        let mut out = String::with_capacity(self.scheme.len() + 24);
        out.push_str(&self.scheme);
        out.push(':');
        if let Some(host) = &self.host {
            out.push_str("//");
            if self.has_credentials() {
                out.push_str(&self.username);
                if !self.password.is_empty() {
                    out.push(':');
                    out.push_str(&self.password);
                }
                out.push('@');
            }
            let _ = write!(out, "{host}");
            if let Some(port) = self.port {
                let _ = write!(out, ":{port}");
            }
        } else if let Path::Segments(segments) = &self.path {
            // Keep a host-less `//segment` path from reading as an authority
            if segments.len() > 1 && segments[0].is_empty() {
                out.push_str("/.");
            }
        }
        match &self.path {
            Path::Opaque(path) => out.push_str(path),
            Path::Segments(segments) => {
                for segment in segments {
                    out.push('/');
                    out.push_str(segment);
                }
            }
        }
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if !exclude_fragment && let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }

    /// The bare scheme, e.g. `"https"`
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The scheme with trailing colon, e.g. `"https:"`
    pub fn protocol(&self) -> String {
        format!("{}:", self.scheme)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Host and port, e.g. `"example.com:8080"`; the port is omitted when
    /// it is the scheme default
    pub fn host(&self) -> String {
        let Some(host) = &self.host else {
            return String::new();
        };
        match self.port {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Host without the port, e.g. `"example.com"` or `"[::1]"`
    pub fn hostname(&self) -> String {
        self.host
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// The decimal port, or `""` when absent or equal to the scheme default
    pub fn port(&self) -> String {
        self.port.map(|p| p.to_string()).unwrap_or_default()
    }

    /// The port number in effect: the explicit port, or the scheme default
    pub fn decoded_port(&self) -> Option<u16> {
        self.port.or_else(|| self.scheme_type.default_port())
    }

    /// The serialized path; segment paths carry a leading `/` per segment
    pub fn pathname(&self) -> String {
        match &self.path {
            Path::Opaque(path) => path.clone(),
            Path::Segments(segments) => {
                let mut out = String::new();
                for segment in segments {
                    out.push('/');
                    out.push_str(segment);
                }
                out
            }
        }
    }

    /// `"?query"`, or `""` when the query is absent or empty
    pub fn search(&self) -> String {
        match &self.query {
            Some(query) if !query.is_empty() => format!("?{query}"),
            _ => String::new(),
        }
    }

    /// The query without the `?`, `""` when absent
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    /// `"#fragment"`, or `""` when the fragment is absent or empty
    pub fn hash(&self) -> String {
        match &self.fragment {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        }
    }

    /// The fragment without the `#`, `""` when absent
    pub fn fragment(&self) -> &str {
        self.fragment.as_deref().unwrap_or("")
    }

    /// The serialized origin. Special schemes yield `scheme://host[:port]`;
    /// `blob:` recurses into its inner URL; `file:` and everything else is
    /// an opaque origin, serialized as `"null"`.
    pub fn origin(&self) -> String {
        match self.scheme.as_str() {
            "blob" => match basic_parse(&self.pathname(), None, None, None) {
                Ok(inner) if inner.scheme != "blob" => inner.origin(),
                _ => "null".to_string(),
            },
            "http" | "https" | "ws" | "wss" | "ftp" => {
                format!("{}://{}", self.scheme, self.host())
            }
            _ => "null".to_string(),
        }
    }

    pub fn is_special(&self) -> bool {
        self.scheme_type.is_special()
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// True for cannot-be-a-base URLs, whose path is a single opaque string
    pub fn has_opaque_path(&self) -> bool {
        matches!(self.path, Path::Opaque(_))
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// True only for an explicit non-default port; default ports are
    /// stored as absent
    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    pub fn has_search(&self) -> bool {
        self.query.is_some()
    }

    pub fn has_hash(&self) -> bool {
        self.fragment.is_some()
    }

    // Setters. Each re-enters the basic parser at the matching state
    // override; a failed re-parse leaves the record unchanged.

    /// Replace the whole record by re-parsing `href`.
    ///
    /// # Errors
    ///
    /// Returns an error when `href` is not an absolute URL; the record is
    /// unchanged in that case.
    pub fn set_href(&mut self, href: &str) -> Result<()> {
        *self = basic_parse(href, None, None, None)?;
        Ok(())
    }

    /// Change the scheme. Ignored when the new scheme fails to parse,
    /// switches between special and non-special, or moves to/from `file`
    /// in a state the standard forbids.
    pub fn set_protocol(&mut self, protocol: &str) -> bool {
        let mut value = String::with_capacity(protocol.len() + 1);
        value.push_str(protocol);
        value.push(':');
        self.reparse_with_override(&value, State::SchemeStart)
    }

    /// Set the username; ignored when the URL has no host or is `file:`
    pub fn set_username(&mut self, username: &str) -> bool {
        if self.cannot_have_username_password_port() {
            return false;
        }
        self.username.clear();
        percent_encode_into(&mut self.username, username, USERINFO);
        true
    }

    /// Set the password; ignored when the URL has no host or is `file:`
    pub fn set_password(&mut self, password: &str) -> bool {
        if self.cannot_have_username_password_port() {
            return false;
        }
        self.password.clear();
        percent_encode_into(&mut self.password, password, USERINFO);
        true
    }

    /// Set host and, optionally, port from `host[:port]`. Ignored for
    /// cannot-be-a-base URLs and on any parse failure.
    pub fn set_host(&mut self, host: &str) -> bool {
        if self.has_opaque_path() {
            return false;
        }
        self.reparse_with_override(host, State::Host)
    }

    /// Set the host, rejecting any `:port` suffix
    pub fn set_hostname(&mut self, hostname: &str) -> bool {
        if self.has_opaque_path() {
            return false;
        }
        self.reparse_with_override(hostname, State::Hostname)
    }

    /// Set the port. The empty string clears it; trailing non-digits stop
    /// the parse; an invalid or out-of-range port is ignored.
    pub fn set_port(&mut self, port: &str) -> bool {
        if self.cannot_have_username_password_port() {
            return false;
        }
        if port.is_empty() {
            self.port = None;
            return true;
        }
        self.reparse_with_override(port, State::Port)
    }

    /// Replace the path; ignored for cannot-be-a-base URLs
    pub fn set_pathname(&mut self, pathname: &str) -> bool {
        if self.has_opaque_path() {
            return false;
        }
        let mut scratch = self.clone();
        scratch.path = Path::Segments(Vec::new());
        match basic_parse(pathname, None, Some(scratch), Some(State::PathStart)) {
            Ok(parsed) => {
                *self = parsed;
                true
            }
            Err(_) => false,
        }
    }

    /// Replace the query. The empty string clears it; a leading `?` is
    /// stripped before parsing.
    pub fn set_search(&mut self, search: &str) {
        if search.is_empty() {
            self.query = None;
            return;
        }
        let value = search.strip_prefix('?').unwrap_or(search);
        let mut scratch = self.clone();
        scratch.query = Some(String::new());
        if let Ok(parsed) = basic_parse(value, None, Some(scratch), Some(State::Query)) {
            *self = parsed;
        }
    }

    /// Replace the fragment. The empty string clears it; a leading `#` is
    /// stripped before parsing.
    pub fn set_hash(&mut self, hash: &str) {
        if hash.is_empty() {
            self.fragment = None;
            return;
        }
        let value = hash.strip_prefix('#').unwrap_or(hash);
        let mut scratch = self.clone();
        scratch.fragment = Some(String::new());
        if let Ok(parsed) = basic_parse(value, None, Some(scratch), Some(State::Fragment)) {
            *self = parsed;
        }
    }

    fn reparse_with_override(&mut self, input: &str, state: State) -> bool {
        match basic_parse(input, None, Some(self.clone()), Some(state)) {
            Ok(parsed) => {
                *self = parsed;
                true
            }
            Err(_) => false,
        }
    }

    fn cannot_have_username_password_port(&self) -> bool {
        matches!(self.host, None | Some(Host::Empty)) || self.scheme == "file"
    }

    // Record plumbing shared with the parser

    pub(crate) fn shorten_path(&mut self) {
        if let Path::Segments(segments) = &mut self.path {
            if self.scheme == "file"
                && segments.len() == 1
                && is_normalized_windows_drive_letter(&segments[0])
            {
                return;
            }
            segments.pop();
        }
    }

    pub(crate) fn push_path_segment(&mut self, segment: String) {
        if let Path::Segments(segments) = &mut self.path {
            segments.push(segment);
        }
    }

    pub(crate) fn path_is_empty(&self) -> bool {
        matches!(&self.path, Path::Segments(segments) if segments.is_empty())
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href(false))
    }
}
