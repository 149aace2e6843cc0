#![allow(clippy::uninlined_format_args)]

use bashstyle::strip;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use taglog::{Config, Level, Logger, Record, SinkSetting, StackInfo, Template, args};

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_milli_opt(3, 4, 5, 6)
        .unwrap()
}

fn any_level() -> impl Strategy<Value = Level> {
    prop::sample::select(vec![Level::Error, Level::Warn, Level::Info, Level::Debug])
}

fn quiet_logger(tag: &str) -> Logger {
    let config = Config {
        console: Some(SinkSetting::Switch(false)),
        file: Some(SinkSetting::Switch(false)),
        ..Config::default()
    };
    Logger::with_tag_and_config(tag, config)
}

// =============================================================================
// Rendering invariants
// =============================================================================

proptest! {
    #[test]
    fn styled_always_strips_to_plain(
        template in "\\PC{0,120}",
        content in "\\PC{0,80}",
        level in any_level(),
    ) {
        let stack = StackInfo {
            addr: "src/lib.rs".into(),
            row: 3,
            col: 9,
            trigger: "run".into(),
        };
        let record = Record {
            timestamp: fixed_time(),
            level,
            tag: "svc",
            content: &content,
            stack: &stack,
        };
        let rendering = Template::parse(&template).render(&record, true);
        prop_assert_eq!(strip(&rendering.styled), rendering.plain);
    }

    #[test]
    fn parse_and_render_never_panic(template in "\\PC{0,200}") {
        let stack = StackInfo::unknown();
        let record = Record {
            timestamp: fixed_time(),
            level: Level::Info,
            tag: "svc",
            content: "x",
            stack: &stack,
        };
        let parsed = Template::parse(&template);
        let _ = parsed.render(&record, true);
        let _ = parsed.render(&record, false);
        let _ = parsed.render_path(&record);
    }

    #[test]
    fn brace_free_templates_pass_through(template in "[a-zA-Z0-9 .,:/_-]{0,100}") {
        let stack = StackInfo::unknown();
        let record = Record {
            timestamp: fixed_time(),
            level: Level::Info,
            tag: "svc",
            content: "x",
            stack: &stack,
        };
        let rendering = Template::parse(&template).render(&record, true);
        prop_assert_eq!(&rendering.plain, &template);
        prop_assert_eq!(&rendering.styled, &template);
    }

    #[test]
    fn rendering_is_pure(
        template in "\\PC{0,120}",
        content in "\\PC{0,80}",
    ) {
        let stack = StackInfo::unknown();
        let record = Record {
            timestamp: fixed_time(),
            level: Level::Warn,
            tag: "svc",
            content: &content,
            stack: &stack,
        };
        let parsed = Template::parse(&template);
        prop_assert_eq!(parsed.render(&record, true), parsed.render(&record, true));
    }

    #[test]
    fn path_rendering_never_emits_escapes(template in "\\PC{0,120}", level in any_level()) {
        let stack = StackInfo::unknown();
        let record = Record {
            timestamp: fixed_time(),
            level,
            tag: "svc",
            content: "x",
            stack: &stack,
        };
        let path = Template::parse(&template).render_path(&record);
        prop_assert!(!path.contains('\x1b'));
    }

    #[test]
    fn date_patterns_render_deterministically(pattern in "[a-z:. -]{0,40}") {
        let template = format!("{{date({pattern})}}");
        let stack = StackInfo::unknown();
        let record = Record {
            timestamp: fixed_time(),
            level: Level::Info,
            tag: "svc",
            content: "x",
            stack: &stack,
        };
        let parsed = Template::parse(&template);
        let first = parsed.render(&record, true);
        let second = parsed.render(&record, true);
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Level invariants
// =============================================================================

proptest! {
    #[test]
    fn level_names_round_trip(level in any_level()) {
        prop_assert_eq!(level.as_str().parse::<Level>().ok(), Some(level));
        prop_assert_eq!(level.upper().parse::<Level>().ok(), Some(level));
    }
}

// =============================================================================
// Logger invariants
// =============================================================================

proptest! {
    #[test]
    fn counters_match_call_volume(calls in 0u64..40) {
        let logger = quiet_logger("svc");
        for _ in 0..calls {
            logger.info(&args!["tick"]);
        }
        prop_assert_eq!(logger.count(Level::Info), calls);
        prop_assert_eq!(logger.count(Level::Error), 0);
    }

    #[test]
    fn derived_tag_chain_joins_with_spaces(tags in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let mut logger = quiet_logger(&tags[0]);
        for tag in &tags[1..] {
            logger = logger.derive(tag.as_str());
        }
        prop_assert_eq!(logger.tag(), tags.join(" "));
    }
}
