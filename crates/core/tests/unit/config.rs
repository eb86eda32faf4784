//! Machine configuration defaults and JSON parsing.

use pretty_assertions::assert_eq;
use sbxsim_core::MachineConfig;

#[test]
fn defaults_are_a_quiet_sixteen_mebibyte_machine() {
    let config = MachineConfig::default();
    assert_eq!(config.heap_quota, 16 * 1024 * 1024);
    assert!(!config.profiling);
    assert!(!config.trace_instructions);
}

#[test]
fn json_overrides_only_the_named_fields() {
    let config = MachineConfig::from_json(r#"{"heap_quota": 4096, "profiling": true}"#).unwrap();
    assert_eq!(config.heap_quota, 4096);
    assert!(config.profiling);
    assert!(!config.trace_instructions);
}

#[test]
fn empty_document_yields_the_defaults() {
    let config = MachineConfig::from_json("{}").unwrap();
    assert_eq!(config.heap_quota, MachineConfig::default().heap_quota);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(MachineConfig::from_json("{\"heap_quota\":").is_err());
    assert!(MachineConfig::from_json("[]").is_err());
}
