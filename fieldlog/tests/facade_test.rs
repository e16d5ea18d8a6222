use fieldlog::{fields, Fields, LogContext, LogFormat, LogLevel, Logger, SharedBuffer};
use serde_json::Value as JsonValue;
use std::thread;

fn capture() -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    (Logger::new(buffer.clone()), buffer)
}

fn single_record(buffer: &SharedBuffer) -> JsonValue {
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1, "expected one record, got {:?}", lines);
    serde_json::from_str(&lines[0]).expect("expected valid JSON output")
}

#[test]
fn info_record_carries_message_fields_and_caller() {
    let (logger, buffer) = capture();

    let fields = fields! { "key" => "value" };
    logger.info(&LogContext::background(), "info message", &fields);

    let entry = single_record(&buffer);
    assert_eq!(entry["msg"], "info message");
    assert_eq!(entry["level"], "info");
    assert_eq!(entry["key"], "value");

    let file = entry["file"].as_str().expect("file field");
    let func = entry["func"].as_str().expect("func field");
    assert!(file.starts_with("facade_test.rs:"), "unexpected file {}", file);
    assert!(
        func.ends_with("info_record_carries_message_fields_and_caller"),
        "unexpected func {}",
        func
    );
}

#[test]
fn error_record_renders_the_error_text() {
    let (logger, buffer) = capture();
    logger.setup("error", true);

    let fields = fields! { "request_id" => "abc-123" };
    let err = std::io::Error::other("something went wrong");
    logger.error(&LogContext::background(), "error message", &fields, &err);

    let entry = single_record(&buffer);
    assert_eq!(entry["msg"], "error message");
    assert_eq!(entry["level"], "error");
    assert_eq!(entry["error"], "something went wrong");
    assert_eq!(entry["request_id"], "abc-123");
}

#[test]
fn debug_record_is_emitted_when_enabled() {
    let (logger, buffer) = capture();
    logger.setup("debug", true);

    logger.debug(
        &LogContext::background(),
        "debug message",
        &fields! { "component" => "worker" },
    );

    let entry = single_record(&buffer);
    assert_eq!(entry["msg"], "debug message");
    assert_eq!(entry["level"], "debug");
    assert_eq!(entry["component"], "worker");
}

#[test]
fn warn_record_is_named_warning() {
    let (logger, buffer) = capture();
    logger.setup("warn", true);

    logger.warn(
        &LogContext::background(),
        "warn message",
        &fields! { "threshold" => 90 },
    );

    let entry = single_record(&buffer);
    assert_eq!(entry["msg"], "warn message");
    assert_eq!(entry["level"], "warning");
    assert_eq!(entry["threshold"], 90);
}

#[test]
fn debug_is_suppressed_at_info_level() {
    let (logger, buffer) = capture();
    assert_eq!(logger.level(), LogLevel::Info);

    logger.debug(&LogContext::background(), "should not appear", &Fields::new());

    assert_eq!(buffer.contents().trim(), "");
}

#[test]
fn records_below_the_configured_level_are_dropped() {
    let (logger, buffer) = capture();
    logger.setup("error", true);

    let ctx = LogContext::background();
    logger.info(&ctx, "dropped", &Fields::new());
    logger.warn(&ctx, "dropped", &Fields::new());
    logger.error(&ctx, "kept", &Fields::new(), &std::io::Error::other("x"));

    let entry = single_record(&buffer);
    assert_eq!(entry["msg"], "kept");
}

#[test]
fn invalid_level_behaves_as_info() {
    let (logger, buffer) = capture();
    logger.setup("notavalidlevel", true);
    assert_eq!(logger.level(), LogLevel::Info);

    let ctx = LogContext::background();
    logger.debug(&ctx, "hidden", &Fields::new());
    logger.info(&ctx, "shown", &Fields::new());

    let entry = single_record(&buffer);
    assert_eq!(entry["msg"], "shown");
}

#[test]
fn production_records_carry_an_rfc3339_time() {
    let (logger, buffer) = capture();
    logger.setup("info", true);
    assert_eq!(logger.format(), LogFormat::Json);

    logger.info(&LogContext::background(), "hello", &Fields::new());

    let entry = single_record(&buffer);
    let time = entry["time"].as_str().expect("time field");
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok(), "bad time {}", time);
}

#[test]
fn development_records_are_coloured_text() {
    let (logger, buffer) = capture();
    logger.setup("debug", false);
    assert_eq!(logger.format(), LogFormat::Text);

    logger.info(
        &LogContext::background(),
        "text message",
        &fields! { "key" => "value" },
    );

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(serde_json::from_str::<JsonValue>(line).is_err());
    assert!(line.starts_with("\x1b[36mINFO\x1b[0m["), "got {:?}", line);
    assert!(line.contains("text message"));
    assert!(line.contains("key\x1b[0m=value"));
    assert!(line.contains("file\x1b[0m=\"facade_test.rs:"), "got {:?}", line);
}

#[test]
fn caller_fields_cannot_spoof_caller_metadata() {
    let (logger, buffer) = capture();

    let fields = fields! { "func" => "spoofed", "file" => "spoofed" };
    logger.info(&LogContext::background(), "hello", &fields);

    let entry = single_record(&buffer);
    assert_ne!(entry["func"], "spoofed");
    assert_ne!(entry["file"], "spoofed");
}

#[test]
fn context_is_attached_to_the_entry() {
    let (logger, _buffer) = capture();
    let ctx = LogContext::background().with_value("trace_id", "abc-xyz");

    let entry = logger.entry(&ctx, &fields! { "svc" => "auth" });

    assert_eq!(
        entry.context().value("trace_id").and_then(JsonValue::as_str),
        Some("abc-xyz")
    );
    assert_eq!(entry.fields()["svc"], "auth");
}

#[test]
fn generated_trace_ids_reach_the_record() {
    let (logger, buffer) = capture();
    let ctx = LogContext::new();

    logger.info(&ctx, "traced", &Fields::new());

    let entry = single_record(&buffer);
    assert_eq!(entry["trace_id"].as_str(), ctx.trace_id());
    assert_eq!(entry["span_id"].as_str(), ctx.span_id());
}

#[test]
fn concurrent_records_do_not_interleave() {
    let (logger, buffer) = capture();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    logger.info(
                        &LogContext::background(),
                        "tick",
                        &fields! { "worker" => worker, "i" => i },
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), 200);
    for line in lines {
        let entry: JsonValue = serde_json::from_str(&line).expect("whole record per line");
        assert_eq!(entry["msg"], "tick");
    }
}

#[test]
fn records_from_one_thread_keep_call_order() {
    let (logger, buffer) = capture();
    let ctx = LogContext::background();

    for i in 0..10 {
        logger.info(&ctx, "step", &fields! { "i" => i });
    }

    let order: Vec<i64> = buffer
        .lines()
        .iter()
        .map(|line| serde_json::from_str::<JsonValue>(line).unwrap()["i"].as_i64().unwrap())
        .collect();
    assert_eq!(order, (0..10).collect::<Vec<_>>());
}

#[test]
fn fatal_records_are_named_fatal() {
    let (logger, buffer) = capture();
    logger.setup("fatal", true);

    logger
        .entry(&LogContext::background(), &fields! { "shard" => 7 })
        .log(LogLevel::Fatal, "cannot continue");

    let entry = single_record(&buffer);
    assert_eq!(entry["level"], "fatal");
    assert_eq!(entry["msg"], "cannot continue");
    assert_eq!(entry["shard"], 7);
}

#[test]
fn fatal_records_use_the_fata_tag_in_text() {
    let (logger, buffer) = capture();
    logger.setup("info", false);

    logger
        .entry(&LogContext::background(), &Fields::new())
        .log(LogLevel::Fatal, "cannot continue");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("\x1b[31mFATA\x1b[0m["), "got {:?}", lines[0]);
}

#[test]
fn fatal_level_drops_error_records() {
    let (logger, buffer) = capture();
    logger.setup("fatal", true);

    let ctx = LogContext::background();
    logger.error(&ctx, "dropped", &Fields::new(), &std::io::Error::other("x"));
    logger.warn(&ctx, "dropped", &Fields::new());

    assert!(buffer.is_empty(), "got {:?}", buffer.contents());

    logger.entry(&ctx, &Fields::new()).log(LogLevel::Fatal, "kept");
    assert_eq!(single_record(&buffer)["msg"], "kept");
}

#[test]
fn panic_level_silences_the_leveled_helpers() {
    let (logger, buffer) = capture();
    logger.setup("panic", true);
    assert_eq!(logger.level(), LogLevel::Fatal);

    let ctx = LogContext::background();
    logger.info(&ctx, "dropped", &Fields::new());
    logger.error(&ctx, "dropped", &Fields::new(), &std::io::Error::other("x"));

    assert!(buffer.is_empty());
}
