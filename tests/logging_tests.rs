use adventra::config::LogFormat;
use adventra::logging::init_logging;

#[test]
fn test_second_init_is_an_error_not_a_panic() {
    assert!(init_logging(LogFormat::Json).is_ok());
    tracing::info!(component = "logging_tests", "Subscriber installed");
    assert!(init_logging(LogFormat::Pretty).is_err());
}
