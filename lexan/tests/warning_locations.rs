//! Lexing warnings carry the line and column of the offending token.
//!
//! Installs the process-wide logger, so it lives in its own test binary.

use lexan::config::LexicalPreferences;
use lexan::logging::{self, codes, LogLevel, LoggingService, MemoryLogger};
use lexan::{analyze_with_preferences, Position};
use std::sync::Arc;

#[test]
fn test_warnings_point_at_source_location() {
    let memory = Arc::new(MemoryLogger::new());
    let service = LoggingService::new(memory.clone(), LogLevel::Debug);
    logging::init_global_logging_with_service(Arc::new(service)).unwrap();

    let source = "x = 1;\n  y @ \"open";
    analyze_with_preferences(source, LexicalPreferences::builtin()).unwrap();

    let unrecognized = memory.get_events_with_code(codes::lexical::UNRECOGNIZED_CHARACTER);
    assert_eq!(unrecognized.len(), 1);
    let span = unrecognized[0].span.expect("unrecognized warning has a span");
    assert_eq!(span.start(), Position::new(11, 2, 5));
    assert_eq!(span.end(), Position::new(12, 2, 6));
    assert!(unrecognized[0].format().contains(" at 2:5-6"));

    let unterminated = memory.get_events_with_code(codes::lexical::UNTERMINATED_STRING);
    assert_eq!(unterminated.len(), 1);
    let span = unterminated[0].span.expect("unterminated warning has a span");
    assert_eq!(span.start(), Position::new(13, 2, 7));

    // unterminated literals are always reported, stray characters only on request
    memory.clear();
    let quiet = LexicalPreferences {
        log_unrecognized: false,
        ..LexicalPreferences::builtin()
    };
    analyze_with_preferences("@ \"", quiet).unwrap();
    assert!(memory
        .get_events_with_code(codes::lexical::UNRECOGNIZED_CHARACTER)
        .is_empty());
    assert_eq!(
        memory
            .get_events_with_code(codes::lexical::UNTERMINATED_STRING)
            .len(),
        1
    );
}
