#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Runs the bundled `setters_tests.json` fixture: parse `href`, apply the
/// setter under test with `new_value`, compare the accessors listed in
/// `expected`.
use super::wpt_loader::{SetterTest, SetterTestCollection};
use weburl::Url;

fn load() -> SetterTestCollection {
    let data = include_str!("./setters_tests.json");
    serde_json::from_str(data).expect("failed to parse setters_tests.json")
}

fn run_group(group: &str, tests: &[SetterTest], apply: impl Fn(&mut Url, &str)) {
    for (num, test) in tests.iter().enumerate() {
        let comment = test.comment.as_deref().unwrap_or("");
        let mut url = Url::parse(&test.href, None)
            .unwrap_or_else(|e| panic!("{group} #{num} {comment}: href {:?}: {e}", test.href));

        apply(&mut url, &test.new_value);

        for (accessor, expected) in &test.expected {
            let actual = match accessor.as_str() {
                "href" => url.href(false),
                "protocol" => url.protocol(),
                "username" => url.username().to_string(),
                "password" => url.password().to_string(),
                "host" => url.host(),
                "hostname" => url.hostname(),
                "port" => url.port(),
                "pathname" => url.pathname(),
                "search" => url.search(),
                "hash" => url.hash(),
                other => panic!("unknown accessor {other:?} in fixture"),
            };
            assert_eq!(
                &actual, expected,
                "{group} #{num} {comment}: set({:?}) on {:?}, accessor {accessor}",
                test.new_value, test.href
            );
        }

        // Setter results must survive a serialize/reparse round trip
        let reparsed = Url::parse(&url.href(false), None)
            .unwrap_or_else(|e| panic!("{group} #{num}: reparse of {:?}: {e}", url.href(false)));
        assert_eq!(reparsed.href(false), url.href(false), "{group} #{num}");
    }
}

#[test]
fn test_protocol_setter_fixture() {
    let tests = load();
    run_group("protocol", &tests.protocol, |url, value| {
        url.set_protocol(value);
    });
}

#[test]
fn test_username_setter_fixture() {
    let tests = load();
    run_group("username", &tests.username, |url, value| {
        url.set_username(value);
    });
}

#[test]
fn test_password_setter_fixture() {
    let tests = load();
    run_group("password", &tests.password, |url, value| {
        url.set_password(value);
    });
}

#[test]
fn test_host_setter_fixture() {
    let tests = load();
    run_group("host", &tests.host, |url, value| {
        url.set_host(value);
    });
}

#[test]
fn test_hostname_setter_fixture() {
    let tests = load();
    run_group("hostname", &tests.hostname, |url, value| {
        url.set_hostname(value);
    });
}

#[test]
fn test_port_setter_fixture() {
    let tests = load();
    run_group("port", &tests.port, |url, value| {
        url.set_port(value);
    });
}

#[test]
fn test_pathname_setter_fixture() {
    let tests = load();
    run_group("pathname", &tests.pathname, |url, value| {
        url.set_pathname(value);
    });
}

#[test]
fn test_search_setter_fixture() {
    let tests = load();
    run_group("search", &tests.search, |url, value| {
        url.set_search(value);
    });
}

#[test]
fn test_hash_setter_fixture() {
    let tests = load();
    run_group("hash", &tests.hash, |url, value| {
        url.set_hash(value);
    });
}
