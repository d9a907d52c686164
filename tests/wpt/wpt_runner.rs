use super::wpt_loader::{TestCase, WptFailure, WptTestResult};
/// Conformance test runner: drives `weburl` over loaded fixture cases
use weburl::Url;

pub fn run_url_tests(tests: Vec<TestCase>) -> WptTestResult {
    let mut result = WptTestResult::new();
    let mut test_num = 0;

    for test in tests {
        let TestCase::UrlTest {
            input,
            base,
            href,
            protocol,
            username,
            password,
            host,
            hostname,
            port,
            pathname,
            search,
            hash,
            origin,
            failure,
        } = test
        else {
            result.skipped += 1;
            continue;
        };
        // Entries without an input are comments
        let Some(input) = input else {
            result.skipped += 1;
            continue;
        };
        test_num += 1;

        if failure == Some(true) {
            match Url::parse(&input, base.as_deref()) {
                Ok(url) => {
                    result.failed += 1;
                    result.failures.push(WptFailure {
                        test_num,
                        input,
                        base,
                        field: "parsing".to_string(),
                        expected: "failure".to_string(),
                        actual: url.href(false),
                    });
                }
                Err(_) => result.passed += 1,
            }
            continue;
        }

        let url = match Url::parse(&input, base.as_deref()) {
            Ok(url) => url,
            Err(e) => {
                result.failed += 1;
                result.failures.push(WptFailure {
                    test_num,
                    input,
                    base,
                    field: "parsing".to_string(),
                    expected: "success".to_string(),
                    actual: format!("{e}"),
                });
                continue;
            }
        };

        let mut test_passed = true;
        let mut check = |field: &str, expected: &Option<String>, actual: String| {
            if let Some(expected) = expected
                && *expected != actual
            {
                result.failures.push(WptFailure {
                    test_num,
                    input: input.clone(),
                    base: base.clone(),
                    field: field.to_string(),
                    expected: expected.clone(),
                    actual,
                });
                test_passed = false;
            }
        };

        check("href", &href, url.href(false));
        check("protocol", &protocol, url.protocol());
        check("username", &username, url.username().to_string());
        check("password", &password, url.password().to_string());
        check("host", &host, url.host());
        check("hostname", &hostname, url.hostname());
        check("port", &port, url.port());
        check("pathname", &pathname, url.pathname());
        check("search", &search, url.search());
        check("hash", &hash, url.hash());
        check("origin", &origin, url.origin());

        // Every successful parse must reserialize to a fixed point
        let reparsed = Url::parse(&url.href(false), None);
        match reparsed {
            Ok(reparsed) if reparsed.href(false) == url.href(false) => {}
            Ok(reparsed) => {
                result.failures.push(WptFailure {
                    test_num,
                    input: input.clone(),
                    base: base.clone(),
                    field: "idempotence".to_string(),
                    expected: url.href(false),
                    actual: reparsed.href(false),
                });
                test_passed = false;
            }
            Err(e) => {
                result.failures.push(WptFailure {
                    test_num,
                    input: input.clone(),
                    base: base.clone(),
                    field: "idempotence".to_string(),
                    expected: url.href(false),
                    actual: format!("{e}"),
                });
                test_passed = false;
            }
        }

        if test_passed {
            result.passed += 1;
        } else {
            result.failed += 1;
        }
    }

    result
}
