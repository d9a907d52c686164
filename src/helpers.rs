use crate::compat::Cow;

/// Check if a character is an ASCII tab or newline
pub fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// Fast check if a string contains tabs or newlines
pub fn has_tab_or_newline(input: &str) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input.as_bytes()).is_some()
}

/// Strip leading and trailing C0 controls and spaces per the WHATWG URL
/// Standard input preprocessing.
pub fn trim_c0_and_space(input: &str) -> &str {
    input.trim_matches(|c: char| c as u32 <= 0x20)
}

/// Remove internal ASCII tab/newline characters. Zero-copy in the common
/// case where none are present.
pub fn strip_tab_and_newline(input: &str) -> Cow<'_, str> {
    if !has_tab_or_newline(input) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(
        input
            .chars()
            .filter(|&c| !is_ascii_tab_or_newline(c))
            .collect(),
    )
}
