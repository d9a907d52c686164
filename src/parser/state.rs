/// States of the basic URL parser, per the WHATWG URL Standard.
///
/// Setters re-enter the machine at a specific state (`SchemeStart`, `Host`,
/// `Hostname`, `Port`, `PathStart`, `Query`, `Fragment`); the rest are
/// internal transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    SchemeStart,
    Scheme,
    NoScheme,
    SpecialRelativeOrAuthority,
    PathOrAuthority,
    Relative,
    RelativeSlash,
    SpecialAuthoritySlashes,
    SpecialAuthorityIgnoreSlashes,
    Authority,
    Host,
    /// Same as `Host` but rejects a port; only used as a setter override
    Hostname,
    Port,
    File,
    FileSlash,
    FileHost,
    PathStart,
    Path,
    /// Path of a cannot-be-a-base URL, stored as one opaque string
    OpaquePath,
    Query,
    Fragment,
}
