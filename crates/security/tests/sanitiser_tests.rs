//! Tests for tag stripping and escaping on hostile and malformed input

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use regex::Regex;
use tidyfrag_security::{
    escape_tags, fix_editor_output, strip_tags, SanitiserConfig, SecurityError, TagSanitiser,
};

#[test_log::test]
fn test_strip_script_injection() {
    let html = r#"<p onclick="steal()">Hi</p><script>alert('x')</script><img src=x onerror=alert(1)>"#;
    assert_eq!(strip_tags(html, None).unwrap(), "Hi\n\nalert('x')");
}

#[test_log::test]
fn test_strip_keeps_allowed_tags_intact() {
    let html = r#"<div><b class="x">bold</b> <i>it</i> <u>under</u></div>"#;
    assert_eq!(
        strip_tags(html, Some(&["b", "i"][..])).unwrap(),
        r#"<b class="x">bold</b> <i>it</i> under"#
    );
}

#[test_log::test]
fn test_strip_does_not_protect_longer_names() {
    assert_eq!(
        strip_tags("a<br>b<b>c</b>", Some(&["b"][..])).unwrap(),
        "ab<b>c</b>"
    );
}

#[test_log::test]
fn test_strip_line_structure() {
    assert_eq!(
        strip_tags("one<br />two</p>three", None).unwrap(),
        "one\ntwo\n\nthree"
    );
}

#[test_log::test]
fn test_strip_input_already_using_sentinels() {
    let html = "\u{E000}\u{E001}<b>x</b><i>y</i>";
    let stripped = strip_tags(html, Some(&["b"][..])).unwrap();
    assert_eq!(stripped, "\u{E000}\u{E001}<b>x</b>y");
}

#[test_log::test]
fn test_escape_disallowed_tags() {
    let escaped = escape_tags(r#"<b>ok</b><script src="x">bad</script>"#, Some(&["b"][..])).unwrap();
    assert!(escaped.starts_with("<b>ok</b>&lt;script"));
    assert!(escaped.ends_with("bad&lt;/script&gt;"));
    assert!(!escaped.contains("<script"));
}

#[test_log::test]
fn test_escape_is_case_sensitive_on_names() {
    let escaped = escape_tags("<B>x</B>", Some(&["b"][..])).unwrap();
    assert_eq!(escaped, "&lt;B&gt;x&lt;/B&gt;");
}

#[test_log::test]
fn test_invalid_allow_list() {
    let result = TagSanitiser::new(SanitiserConfig::allowing(["b|i"]));
    assert!(matches!(result, Err(SecurityError::InvalidConfiguration(_))));
    assert!(strip_tags("x", Some(&[""][..])).is_err());
}

#[test_log::test]
fn test_editor_output_cleanup() {
    let html = r#"<p class="x"> </p><p>Keep <a href="JavaScript:go()">me</a></p><h2></h2>"#;
    assert_eq!(
        fix_editor_output(html),
        r#"<p>Keep <a href="go()">me</a></p>"#
    );
}

proptest! {
    #[test]
    fn strip_is_idempotent(text in "[a-z <>/bip\"=]{0,60}") {
        let sanitiser = TagSanitiser::allowing(["b", "i"]).unwrap();
        let once = sanitiser.strip_tags(&text);
        prop_assert_eq!(sanitiser.strip_tags(&once), once);
    }

    #[test]
    fn strip_without_allow_list_leaves_no_tags(text in "[a-z <>/]{0,60}") {
        let stripped = strip_tags(&text, None).unwrap();
        if let Some(open) = stripped.find('<') {
            prop_assert!(!stripped[open..].contains('>'));
        }
    }

    #[test]
    fn escape_without_allow_list_leaves_no_tags(text in "[a-z <>/]{0,60}") {
        let tag = Regex::new(r"</?[a-z][a-z0-9]*[^>]*>").unwrap();
        let escaped = escape_tags(&text, None).unwrap();
        prop_assert!(!tag.is_match(&escaped));
    }
}
