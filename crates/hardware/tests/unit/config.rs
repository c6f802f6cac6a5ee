//! Configuration Tests.
//!
//! Verifies the JSON configuration layer:
//!   1. Defaults match the documented machine.
//!   2. Partial documents fill missing fields with defaults.
//!   3. Zero-sized structures are rejected by name.

use pretty_assertions::assert_eq;
use r10k_core::common::{ConfigError, DEFAULT_EXCEPTION_PC};
use r10k_core::config::Config;
use rstest::rstest;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.general.exception_handler_pc, DEFAULT_EXCEPTION_PC);
    assert!(!config.general.trace_instructions);
    assert_eq!(config.pipeline.fetch_width, 4);
    assert_eq!(config.pipeline.decode_buffer_size, 4);
    assert_eq!(config.pipeline.active_list_size, 32);
    assert_eq!(config.pipeline.issue_queue_size, 32);
    assert_eq!(config.pipeline.alu_latency, 1);
    assert_eq!(config.pipeline.rollback_width, None);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn empty_document_is_default() {
    assert_eq!(Config::from_json("{}"), Ok(Config::default()));
}

#[test]
fn partial_document_keeps_other_defaults() {
    let config = Config::from_json(
        r#"{ "general": { "exception_handler_pc": 4096 },
             "pipeline": { "muldiv_latency": 5, "rollback_width": 2 } }"#,
    )
    .unwrap();
    assert_eq!(config.general.exception_handler_pc, 4096);
    assert_eq!(config.general.max_cycles, Config::default().general.max_cycles);
    assert_eq!(config.pipeline.muldiv_latency, 5);
    assert_eq!(config.pipeline.rollback_width, Some(2));
    assert_eq!(config.pipeline.alu_units, 1);
}

#[rstest]
#[case("fetch_width")]
#[case("decode_buffer_size")]
#[case("dispatch_width")]
#[case("commit_width")]
#[case("active_list_size")]
#[case("issue_queue_size")]
#[case("alu_units")]
#[case("alu_latency")]
#[case("muldiv_units")]
#[case("muldiv_latency")]
#[case("rollback_width")]
fn zero_field_rejected(#[case] field: &'static str) {
    let json = format!(r#"{{ "pipeline": {{ "{field}": 0 }} }}"#);
    assert_eq!(Config::from_json(&json), Err(ConfigError::Zero(field)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        Config::from_json(r#"{ "pipeline": { "fetch_width": "four" } }"#),
        Err(ConfigError::Parse(_))
    ));
}
