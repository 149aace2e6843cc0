//! Integration tests for template rendering.
//!
//! Tests verify:
//! - The plain/styled pair stays synchronized (strip(styled) == plain)
//! - Placeholder substitution, case-insensitivity, repeats
//! - Malformed placeholders degrade to literals
//! - Per-field styling bytes and the whole-line date tint
//! - Call-site fragments and the call-detail switch
//! - Path rendering for the file sink

#![allow(clippy::uninlined_format_args)]

use bashstyle::strip;
use chrono::{NaiveDate, NaiveDateTime};
use taglog::{DEFAULT_FILENAME, DEFAULT_PRINT_FORMAT, Level, Record, StackInfo, Template, args};

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_milli_opt(3, 4, 5, 6)
        .unwrap()
}

fn sample_stack() -> StackInfo {
    StackInfo {
        addr: "src/main.rs".into(),
        row: 10,
        col: 5,
        trigger: "main".into(),
    }
}

fn record<'a>(stack: &'a StackInfo, content: &'a str) -> Record<'a> {
    Record {
        timestamp: fixed_time(),
        level: Level::Info,
        tag: "app",
        content,
        stack,
    }
}

// =============================================================================
// 1. Default template
// =============================================================================

#[test]
fn default_template_plain_rendering() {
    let stack = sample_stack();
    let rendering =
        Template::parse(DEFAULT_PRINT_FORMAT).render(&record(&stack, "hello world"), true);
    assert_eq!(
        rendering.plain,
        "2024-01-02 03:04:05.006 [INFO] [app] hello world (src/main.rs:10:5)"
    );
}

#[test]
fn default_template_styled_strips_to_plain() {
    let stack = sample_stack();
    let rendering =
        Template::parse(DEFAULT_PRINT_FORMAT).render(&record(&stack, "hello world"), true);
    assert_eq!(strip(&rendering.styled), rendering.plain);
}

#[test]
fn default_template_styled_structure() {
    let stack = sample_stack();
    let rendering = Template::parse(DEFAULT_PRINT_FORMAT).render(&record(&stack, "hi"), true);
    // Whole-line tint from the date placeholder, inner runs per field.
    assert!(rendering.styled.starts_with("\x1b[96;1m2024-01-02"));
    assert!(rendering.styled.ends_with("\x1b[0m"));
    assert!(rendering.styled.contains("\x1b[34mINFO\x1b[0m"));
    assert!(rendering.styled.contains("\x1b[96mapp\x1b[0m"));
    assert!(rendering.styled.contains("\x1b[92mhi\x1b[0m"));
    assert!(rendering.styled.contains("\x1b[94;4m(src/main.rs:10:5)\x1b[0m"));
}

// =============================================================================
// 2. Placeholder semantics
// =============================================================================

#[test]
fn placeholders_match_case_insensitively() {
    let stack = sample_stack();
    let upper = Template::parse("[{LEVEL}] [{Tag}] {CONTENT}").render(&record(&stack, "x"), true);
    assert_eq!(upper.plain, "[INFO] [app] x");
}

#[test]
fn repeated_placeholders_all_substitute() {
    let stack = sample_stack();
    let rendering = Template::parse("{level} {level}").render(&record(&stack, "x"), true);
    assert_eq!(rendering.plain, "INFO INFO");

    let rendering = Template::parse("{tag}/{tag}").render(&record(&stack, "x"), true);
    assert_eq!(rendering.plain, "app/app");
}

#[test]
fn unknown_placeholders_stay_literal() {
    let stack = sample_stack();
    let rendering = Template::parse("{nope} {level} {}").render(&record(&stack, "x"), true);
    assert_eq!(rendering.plain, "{nope} INFO {}");
}

#[test]
fn malformed_placeholders_stay_literal() {
    let stack = sample_stack();
    for template in ["{level", "{date(yyyy", "{stack(addr", "{date yyyy}"] {
        let rendering = Template::parse(template).render(&record(&stack, "x"), true);
        assert_eq!(rendering.plain, template, "template: {template}");
        assert_eq!(rendering.styled, template, "template: {template}");
    }
}

#[test]
fn content_is_never_rescanned() {
    let stack = sample_stack();
    let rendering =
        Template::parse("[{level}] {content}").render(&record(&stack, "{level} {tag}"), true);
    assert_eq!(rendering.plain, "[INFO] {level} {tag}");
}

#[test]
fn empty_content_keeps_surrounding_literals() {
    let stack = sample_stack();
    let rendering = Template::parse("[{content}]").render(&record(&stack, ""), true);
    assert_eq!(rendering.plain, "[]");
    assert_eq!(strip(&rendering.styled), "[]");
}

// =============================================================================
// 3. Field styling
// =============================================================================

#[test]
fn level_colors_by_severity() {
    let stack = StackInfo::unknown();
    let template = Template::parse("{level}");
    let expected = [
        (Level::Error, "\x1b[91mERROR\x1b[0m"),
        (Level::Warn, "\x1b[93mWARN\x1b[0m"),
        (Level::Info, "\x1b[34mINFO\x1b[0m"),
        (Level::Debug, "\x1b[95mDEBUG\x1b[0m"),
    ];
    for (level, styled) in expected {
        let mut rec = record(&stack, "x");
        rec.level = level;
        let rendering = template.render(&rec, true);
        assert_eq!(rendering.styled, styled);
        assert_eq!(rendering.plain, level.upper());
    }
}

#[test]
fn tag_and_content_accents() {
    let stack = StackInfo::unknown();
    let rendering = Template::parse("{tag} {content}").render(&record(&stack, "go"), true);
    assert_eq!(rendering.styled, "\x1b[96mapp\x1b[0m \x1b[92mgo\x1b[0m");
    assert_eq!(rendering.plain, "app go");
}

// =============================================================================
// 4. Date rendering
// =============================================================================

#[test]
fn date_renders_deterministically() {
    let stack = StackInfo::unknown();
    let template = Template::parse("{date(yyyy-mm-dd)}");
    let first = template.render(&record(&stack, "x"), true);
    let second = template.render(&record(&stack, "x"), true);
    assert_eq!(first.plain, "2024-01-02");
    assert_eq!(first, second);
}

#[test]
fn date_placeholder_tints_whole_line() {
    let stack = StackInfo::unknown();
    let rendering = Template::parse("{date(hh:min)} up").render(&record(&stack, "x"), true);
    assert_eq!(rendering.styled, "\x1b[96;1m03:04 up\x1b[0m");
    assert_eq!(rendering.plain, "03:04 up");
}

#[test]
fn line_without_date_is_not_tinted() {
    let stack = StackInfo::unknown();
    let rendering = Template::parse("plain {tag}").render(&record(&stack, "x"), true);
    assert!(rendering.styled.starts_with("plain "));
}

// =============================================================================
// 5. Call-site fragments
// =============================================================================

#[test]
fn stack_fragment_is_parenthesized_and_styled() {
    let stack = sample_stack();
    let rendering = Template::parse("{stack(addr:row:col)}").render(&record(&stack, "x"), true);
    assert_eq!(rendering.plain, "(src/main.rs:10:5)");
    assert_eq!(rendering.styled, "\x1b[94;4m(src/main.rs:10:5)\x1b[0m");
}

#[test]
fn stack_subtemplate_mixes_tokens_and_literals() {
    let stack = sample_stack();
    let rendering =
        Template::parse("{stack(trigger at addr, line row)}").render(&record(&stack, "x"), true);
    assert_eq!(rendering.plain, "(main at src/main.rs, line 10)");
}

#[test]
fn sentinel_stack_renders_zeros() {
    let stack = StackInfo::unknown();
    let rendering = Template::parse("{stack(addr:row:col)}").render(&record(&stack, "x"), true);
    assert_eq!(rendering.plain, "(:0:0)");
}

#[test]
fn call_detail_off_drops_fragment() {
    let stack = sample_stack();
    let rendering =
        Template::parse("{content} {stack(addr:row:col)}").render(&record(&stack, "go"), false);
    assert_eq!(rendering.plain, "go ");
    assert_eq!(strip(&rendering.styled), "go ");
}

// =============================================================================
// 6. Content from arguments
// =============================================================================

#[test]
fn scalar_and_structured_arguments_render_inline() {
    let list = args!["hello", serde_json::json!({"x": 1})];
    let content = list
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    let stack = StackInfo::unknown();
    let rendering = Template::parse("[{level}] {content}").render(&record(&stack, &content), true);
    assert_eq!(rendering.plain, r#"[INFO] hello {"x":1}"#);
}

// =============================================================================
// 7. Path rendering
// =============================================================================

#[test]
fn file_target_for_tag_and_level() {
    let stack = StackInfo::unknown();
    let mut rec = record(&stack, "ignored");
    rec.tag = "svc";
    rec.level = Level::Error;
    let filename = Template::parse(DEFAULT_FILENAME).render_path(&rec);
    assert_eq!(filename, "2024-01-02.svc.error.log");
}

#[test]
fn path_rendering_has_no_styling() {
    let stack = sample_stack();
    let path = Template::parse("{date(yyyy)}-{tag}-{level}").render_path(&record(&stack, "x"));
    assert_eq!(path, "2024-app-info");
    assert!(!path.contains('\x1b'));
}

#[test]
fn path_rendering_drops_content_and_stack() {
    let stack = sample_stack();
    let path =
        Template::parse("{tag}{content}{stack(addr)}.log").render_path(&record(&stack, "secret"));
    assert_eq!(path, "app.log");
}
