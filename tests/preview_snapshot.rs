//! Snapshot tests for the preview panel text.

mod common;

use textdup::transform::DEFAULT_PREVIEW_LINES;
use textdup::{Error, PendingTransform, RepeatCount, SubstitutionMap, ValidationError, preview};

fn repeat(n: u32) -> PendingTransform {
    PendingTransform::Repeat(RepeatCount::new(n).unwrap())
}

fn replace(from: &str, to: &str) -> PendingTransform {
    PendingTransform::Substitute(SubstitutionMap::new(from, to).unwrap())
}

#[test]
fn preview_repeat_short_text() {
    common::init_logging();
    let p = preview("alpha\nbeta\n", DEFAULT_PREVIEW_LINES, &repeat(3)).unwrap();
    insta::assert_snapshot!(p.to_string(), @r"
    Preview (all lines):
    Line 1: alpha
    Line 2: beta

    Will be duplicated 3 times
    ");
}

#[test]
fn preview_repeat_truncated() {
    let text = "1\n2\n3\n4\n5\n6\n7";
    let p = preview(text, DEFAULT_PREVIEW_LINES, &repeat(2)).unwrap();
    assert_eq!(p.total_lines, 7);
    insta::assert_snapshot!(p.to_string(), @r"
    Preview (first 5 lines):
    Line 1: 1
    Line 2: 2
    Line 3: 3
    Line 4: 4
    Line 5: 5

    Will be duplicated 2 times
    ");
}

#[test]
fn preview_substitution_marks_changed_lines() {
    let text = "hello\nworld\nlol";
    let p = preview(text, 2, &replace("lo", "LO")).unwrap();
    insta::assert_snapshot!(p.to_string(), @r"
    Preview (first 2 lines):
    Line 1: hello -> heLLO
    Line 2: world -> wOrLd

    Will replace 8 characters
    ");
}

#[test]
fn preview_exactly_limit_lines_reads_first_n() {
    let p = preview("a\nb", 2, &repeat(2)).unwrap();
    assert!(!p.is_complete());
    assert!(p.to_string().starts_with("Preview (first 2 lines):"));

    let shorter = preview("a\nb", 3, &repeat(2)).unwrap();
    assert!(shorter.is_complete());
    assert!(shorter.to_string().starts_with("Preview (all lines):"));
}

#[test]
fn preview_of_crlf_text() {
    let p = preview("alpha\r\nbeta\r\n", 5, &replace("a", "A")).unwrap();
    insta::assert_snapshot!(p.to_string(), @r"
    Preview (all lines):
    Line 1: alpha -> AlphA
    Line 2: beta -> betA

    Will replace 3 characters
    ");
}

#[test]
fn preview_rejects_zero_limit_and_blank_text() {
    assert!(matches!(
        preview("x", 0, &repeat(2)),
        Err(Error::Validation(ValidationError::ZeroPreviewLimit))
    ));
    assert!(matches!(
        preview(" \n ", 5, &repeat(2)),
        Err(Error::EmptyInput { .. })
    ));
}
