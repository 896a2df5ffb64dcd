use serde_json::json;
use std::collections::BTreeMap;
use tracing_log_observer::sink::contains_attr;
use tracing_log_observer::{observe, Attr, Level, LoggedRecord, Logger, ObservedLogs, ObserverConfig};

fn fixtures() -> Vec<LoggedRecord> {
    vec![
        LoggedRecord::new(Level::INFO, "log a", vec![Attr::string("fStr", "1"), Attr::int("a", 1)]),
        LoggedRecord::new(Level::INFO, "log a", vec![Attr::string("fStr", "2"), Attr::int("b", 2)]),
        LoggedRecord::new(Level::INFO, "log b", vec![Attr::int("a", 1), Attr::int("b", 2)]),
        LoggedRecord::new(
            Level::INFO,
            "log c",
            vec![Attr::int("a", 1), Attr::group("ns", vec![Attr::int("a", 2)])],
        ),
        LoggedRecord::new(
            Level::INFO,
            "msg 1",
            vec![Attr::int("a", 1), Attr::group("ns", vec![Attr::string("group-must-not", "be-empty")])],
        ),
        LoggedRecord::new(
            Level::INFO,
            "any map",
            vec![Attr::any("map", &BTreeMap::from([("a", "b")]))],
        ),
        LoggedRecord::new(Level::INFO, "any slice", vec![Attr::any("slice", &["a"])]),
        LoggedRecord::new(
            Level::INFO,
            "msg 2",
            vec![Attr::int("b", 2), Attr::group("filterMe", vec![Attr::string("group-must-not", "be-empty")])],
        ),
        LoggedRecord::new(Level::INFO, "any slice", vec![Attr::any("filterMe", &["b"])]),
        LoggedRecord::new(Level::WARN, "danger will robinson", vec![Attr::int("b", 42)]),
        LoggedRecord::new(Level::ERROR, "warp core breach", vec![Attr::int("b", 42)]),
    ]
}

fn sink_with(logs: &[LoggedRecord], ring: bool) -> std::sync::Arc<dyn ObservedLogs> {
    let (handler, sink) = observe(ObserverConfig::new().ring(ring));
    let logger = Logger::new(handler);
    for log in logs {
        logger.log_attrs(log.level, &log.message, log.attrs.clone());
    }
    sink
}

fn check_filters(ring: bool) {
    let logs = fixtures();
    let sink = sink_with(&logs, ring);

    let cases: Vec<(&str, Box<dyn ObservedLogs>, Vec<LoggedRecord>)> = vec![
        ("filter by message", sink.filter_message("log a"), logs[0..2].to_vec()),
        ("filter by field", sink.filter_attr(&Attr::string("fStr", "1")), logs[0..1].to_vec()),
        (
            "filter by message and field",
            sink.filter_message("log a").filter_attr(&Attr::int("b", 2)),
            logs[1..2].to_vec(),
        ),
        (
            "filter by field with duplicate fields",
            sink.filter_attr(&Attr::int("a", 2)),
            logs[3..4].to_vec(),
        ),
        ("filter doesn't match any messages", sink.filter_message("no match"), vec![]),
        ("filter by snippet", sink.filter_message_snippet("log"), logs[0..4].to_vec()),
        (
            "filter by snippet and field",
            sink.filter_message_snippet("a").filter_attr(&Attr::int("b", 2)),
            logs[1..2].to_vec(),
        ),
        (
            "filter for map",
            sink.filter_attr(&Attr::any("map", &json!({"a": "b"}))),
            logs[5..6].to_vec(),
        ),
        (
            "filter for slice",
            sink.filter_attr(&Attr::any("slice", &vec!["a"])),
            logs[6..7].to_vec(),
        ),
        ("filter field key", sink.filter_field_key("filterMe"), logs[7..9].to_vec()),
        (
            "filter by arbitrary function",
            sink.filter(&|r| r.attrs.len() > 1),
            logs[0..5].iter().chain(&logs[7..8]).cloned().collect(),
        ),
        ("filter level", sink.filter_level_exact(Level::WARN), logs[9..10].to_vec()),
        ("filter level error", sink.filter_level_exact(Level::ERROR), logs[10..11].to_vec()),
    ];

    for (msg, filtered, want) in cases {
        assert_eq!(filtered.all_untimed(), want, "{} (ring={})", msg, ring);
        assert_eq!(filtered.len(), want.len(), "{} (ring={})", msg, ring);
    }

    assert_eq!(sink.len(), logs.len(), "filters must not change the source");
}

#[test]
fn test_filters_ordered() {
    check_filters(false);
}

#[test]
fn test_filters_ring() {
    check_filters(true);
}

#[test]
fn test_filter_attr_finds_deeply_nested() {
    let (handler, sink) = observe(ObserverConfig::default());
    let logger = Logger::new(handler);
    logger
        .with_group("outer")
        .with_group("inner")
        .info("deep", vec![Attr::string("needle", "x")]);
    logger.info("shallow", vec![Attr::string("other", "x")]);

    let record = &sink.all()[0];
    assert!(record.attrs.iter().all(|a| a.key != "needle"));

    let found = sink.filter_attr(&Attr::string("needle", "x"));
    assert_eq!(found.len(), 1);
    assert_eq!(found.all()[0].message, "deep");

    assert!(sink.filter_attr(&Attr::string("needle", "y")).is_empty());
    assert!(sink.filter_field_key("needle").is_empty(), "field key only looks at the top level");
}

#[test]
fn test_filter_attr_requires_same_kind() {
    let (handler, sink) = observe(ObserverConfig::default());
    Logger::new(handler).info("typed", vec![Attr::int("n", 1)]);

    assert_eq!(sink.filter_attr(&Attr::int("n", 1)).len(), 1);
    assert!(sink.filter_attr(&Attr::uint("n", 1)).is_empty());
    assert!(sink.filter_attr(&Attr::string("n", "1")).is_empty());
}

#[test]
fn test_filters_compose() {
    let logs = fixtures();
    let sink = sink_with(&logs, false);
    let target = Attr::int("b", 2);

    let chained = sink.filter_message("log a").filter_attr(&target);
    let combined = sink.filter(&|r| r.message == "log a" && contains_attr(&r.attrs, &target));
    assert_eq!(chained.all(), combined.all());
}

#[test]
fn test_filtered_store_is_independent() {
    let logs = fixtures();
    let sink = sink_with(&logs, true);

    let warnings = sink.filter_level_exact(Level::WARN);
    warnings.add(
        tracing_log_observer::Record::new(Level::WARN, "added later"),
        vec![],
    );
    assert_eq!(warnings.len(), 2);
    assert_eq!(sink.len(), logs.len());
    assert_eq!(warnings.take_all().len(), 2);
    assert_eq!(sink.filter_level_exact(Level::WARN).len(), 1);
}
