#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Runs the bundled `urltestdata.json` conformance fixture and requires a
/// 100% pass rate.
use super::wpt_loader::TestCase;
use super::wpt_runner::run_url_tests;

#[test]
fn test_urltestdata_fixture() {
    let test_data = include_str!("./urltestdata.json");
    let tests: Vec<TestCase> =
        serde_json::from_str(test_data).expect("failed to parse urltestdata.json");

    let case_count = tests.len();
    let result = run_url_tests(tests);

    if !result.failures.is_empty() {
        println!("\n{}", result.summary());
        for (i, failure) in result.failures.iter().take(20).enumerate() {
            println!("\n{}. case #{}: {}", i + 1, failure.test_num, failure.field);
            println!("   input: {:?}", failure.input);
            if let Some(base) = &failure.base {
                println!("   base: {base:?}");
            }
            println!("   expected: {}", failure.expected);
            println!("   actual:   {}", failure.actual);
        }
        if result.failures.len() > 20 {
            println!("\n... and {} more failures", result.failures.len() - 20);
        }
    }

    assert_eq!(
        result.failed, 0,
        "urltestdata.json conformance failed: {}",
        result.summary()
    );

    // The fixture mixes cases with comments; make sure the loader actually
    // skipped the comments instead of miscounting them as passes.
    assert!(result.passed >= 60, "unexpectedly few cases ran");
    assert!(result.passed + result.skipped <= case_count);
    assert!(result.skipped >= 1, "comment entries should be skipped");
}
