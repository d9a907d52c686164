/// Loader for WHATWG URL conformance fixtures
///
/// `urltestdata.json` is an array mixing test objects with bare-string
/// comments; objects without an `input` field are comments too and must be
/// skipped.
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum TestCase {
    UrlTest {
        #[serde(default)]
        input: Option<String>,
        #[serde(default)]
        base: Option<String>,
        #[serde(default)]
        href: Option<String>,
        #[serde(default)]
        protocol: Option<String>,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
        #[serde(default)]
        host: Option<String>,
        #[serde(default)]
        hostname: Option<String>,
        #[serde(default)]
        port: Option<String>,
        #[serde(default)]
        pathname: Option<String>,
        #[serde(default)]
        search: Option<String>,
        #[serde(default)]
        hash: Option<String>,
        #[serde(default)]
        origin: Option<String>,
        #[serde(default)]
        failure: Option<bool>,
    },
    Comment(String),
}

/// One entry of `setters_tests.json`: apply `new_value` to a URL parsed
/// from `href`, then compare every accessor named in `expected`.
#[derive(Debug, Deserialize, Clone)]
pub struct SetterTest {
    #[serde(default)]
    pub comment: Option<String>,
    pub href: String,
    pub new_value: String,
    pub expected: HashMap<String, String>,
}

/// `setters_tests.json` maps each setter name to its test list
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SetterTestCollection {
    pub protocol: Vec<SetterTest>,
    pub username: Vec<SetterTest>,
    pub password: Vec<SetterTest>,
    pub host: Vec<SetterTest>,
    pub hostname: Vec<SetterTest>,
    pub port: Vec<SetterTest>,
    pub pathname: Vec<SetterTest>,
    pub search: Vec<SetterTest>,
    pub hash: Vec<SetterTest>,
}

#[derive(Debug, Clone, Default)]
pub struct WptTestResult {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub failures: Vec<WptFailure>,
}

#[derive(Debug, Clone)]
pub struct WptFailure {
    pub test_num: usize,
    pub input: String,
    pub base: Option<String>,
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl WptTestResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pass_rate(&self) -> f64 {
        let total = self.passed + self.failed;
        if total == 0 {
            0.0
        } else {
            (self.passed as f64 / total as f64) * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Passed: {}, Failed: {}, Skipped: {}, Pass Rate: {:.2}%",
            self.passed,
            self.failed,
            self.skipped,
            self.pass_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_entries_deserialize() {
        let json = r#"["a comment", {"input": "http://x/", "href": "http://x/"}, {"comment": "object comment"}]"#;
        let cases: Vec<TestCase> = serde_json::from_str(json).expect("fixture syntax");
        assert_eq!(cases.len(), 3);
        assert!(matches!(&cases[0], TestCase::Comment(_)));
        assert!(matches!(
            &cases[1],
            TestCase::UrlTest { input: Some(_), .. }
        ));
        // Objects without `input` are comments by the fixture contract
        assert!(matches!(&cases[2], TestCase::UrlTest { input: None, .. }));
    }
}
