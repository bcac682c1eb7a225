//! Assertion helpers for rendered reports

/// Assert that `report` has a table row whose cells match `cells`
///
/// # Examples
///
/// ```ignore
/// assert_has_row(&report, &["**index.js**", "`Modified`", "`1 kB`", "`1.2 kB`", "`+200 B (+20%)`"]);
/// ```
#[allow(dead_code)]
pub fn assert_has_row(report: &str, cells: &[&str]) {
    let row = format!("| {} |", cells.join(" | "));
    assert!(
        report.lines().any(|line| line == row),
        "Row not found in report:\n  row: {}\n  report:\n{}",
        row,
        report
    );
}

/// Assert that `needle` appears before `later` in `report`
#[allow(dead_code)]
pub fn assert_in_order(report: &str, needle: &str, later: &str) {
    let first = report
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in report:\n{}", needle, report));
    let second = report
        .find(later)
        .unwrap_or_else(|| panic!("{:?} not found in report:\n{}", later, report));
    assert!(
        first < second,
        "{:?} should come before {:?} in report:\n{}",
        needle,
        later,
        report
    );
}

/// Split a report at its collapsed section: (visible part, collapsed part)
#[allow(dead_code)]
pub fn split_collapsed(report: &str) -> (&str, &str) {
    report.split_once("<details>").unwrap_or((report, ""))
}
