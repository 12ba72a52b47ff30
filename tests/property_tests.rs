//! Property-based tests for fancy_logger using proptest

use fancy_logger::prelude::*;
use fancy_logger::BufferPool;
use proptest::prelude::*;
use std::sync::Arc;

fn plain_logger(name: &str, registry: &Arc<Registry>, sink: &MemorySink) -> Logger {
    Logger::builder()
        .name(name)
        .registry(Arc::clone(registry))
        .pool(Arc::new(BufferPool::new(2)))
        .output(Arc::new(sink.clone()))
        .color(false)
        .timestamp(false)
        .build()
}

fn any_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        any::<i64>().prop_map(FieldValue::Int),
        any::<bool>().prop_map(FieldValue::Bool),
        "[a-z0-9/]{0,12}".prop_map(FieldValue::String),
        Just(FieldValue::Null),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Standard level names parse regardless of case
    #[test]
    fn test_level_parse_case_insensitive(
        level in prop::sample::select(Level::STANDARD.to_vec()),
        upper in prop::collection::vec(any::<bool>(), 5)
    ) {
        let mixed: String = level
            .as_str()
            .chars()
            .zip(upper.iter().cycle())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        let parsed: Level = mixed.parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    /// A prefix label is always the level wrapped in brackets
    #[test]
    fn test_prefix_label(label in "[A-Z]{1,10}") {
        let level = Level::new(label.clone());
        prop_assert_eq!(level.to_prefix(), format!("[{}]", label));
        prop_assert_eq!(level.width(), label.len());
    }
}

// ============================================================================
// Rendering Tests
// ============================================================================

proptest! {
    /// Output does not depend on field insertion order
    #[test]
    fn test_field_order_is_irrelevant(
        entries in prop::collection::hash_map("[a-z]{1,8}", any_value(), 0..12)
    ) {
        let registry = Arc::new(Registry::new());
        let forward_sink = MemorySink::new();
        let backward_sink = MemorySink::new();

        let pairs: Vec<(String, FieldValue)> = entries.into_iter().collect();
        let forward: FieldMap = pairs.iter().cloned().collect();
        let backward: FieldMap = pairs.iter().rev().cloned().collect();

        plain_logger("p", &registry, &forward_sink).info_map(&forward);
        plain_logger("p", &registry, &backward_sink).info_map(&backward);

        prop_assert_eq!(forward_sink.contents(), backward_sink.contents());
    }

    /// Exactly one trailing newline, whether or not the message had one
    #[test]
    fn test_single_trailing_newline(message in "[^\n]{0,40}", terminated in any::<bool>()) {
        let registry = Arc::new(Registry::new());
        let sink = MemorySink::new();
        let logger = plain_logger("p", &registry, &sink);

        let input = if terminated { format!("{}\n", message) } else { message.clone() };
        logger.info(&input);

        let output = sink.contents_string();
        let expected_tail = format!("{}\n", message);
        prop_assert!(output.ends_with(&expected_tail));
        prop_assert!(!output.ends_with("\n\n"));
        prop_assert_eq!(output.matches('\n').count(), 1);
    }

    /// Name column never shrinks, whatever order names arrive in
    #[test]
    fn test_name_width_monotonic(names in prop::collection::vec("[a-z]{0,16}", 1..20)) {
        let registry = Registry::new();
        let mut previous = 0;
        for name in &names {
            let width = registry.register_name(name);
            prop_assert!(width >= previous);
            previous = width;
        }
        let widest = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
        prop_assert_eq!(registry.max_name_width(), widest);
    }

    /// Every logger on a registry starts its level label in the same column
    #[test]
    fn test_labels_aligned(names in prop::collection::vec("[a-z]{1,12}", 1..6)) {
        let registry = Arc::new(Registry::new());
        let sink = MemorySink::new();
        let loggers: Vec<Logger> = names
            .iter()
            .map(|name| plain_logger(name, &registry, &sink))
            .collect();
        for logger in &loggers {
            logger.info("x");
        }

        let columns: Vec<Option<usize>> = sink.lines().iter().map(|l| l.find('[')).collect();
        prop_assert!(columns.windows(2).all(|pair| pair[0] == pair[1]));
    }

    /// Disabling color strips every escape sequence
    #[test]
    fn test_no_escapes_without_color(message in "[ -~]{0,40}") {
        let registry = Arc::new(Registry::new());
        let sink = MemorySink::new();
        let logger = plain_logger("p", &registry, &sink);
        logger.warn(&message);
        logger.info_map(&FieldMap::new().with_field("m", message.as_str()));
        prop_assert!(!sink.contents().contains(&0x1b));
    }
}
