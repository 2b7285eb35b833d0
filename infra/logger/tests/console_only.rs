use hearth_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn console_only_has_no_guard_and_second_init_fails() {
    let logger = Logger::builder()
        .name("hearth-console-only")
        .console(true)
        .ansi(false)
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");

    let err = Logger::builder()
        .name("hearth-console-only-second")
        .init()
        .expect_err("second init should fail");
    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
