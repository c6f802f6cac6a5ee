//! Loader Tests.
//!
//! Reads program and configuration files from disk.

use std::io::Write;

use pretty_assertions::assert_eq;
use r10k_core::common::{ConfigError, ProgramError};
use r10k_core::isa::{Instruction, Opcode};
use r10k_core::sim::loader::{load_config, load_program};
use tempfile::NamedTempFile;

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_program() {
    let file = file_with(r#"["addi x1, x0, 3", "mulu x2, x1, x1"]"#);
    let program = load_program(file.path()).unwrap();
    assert_eq!(
        program.instructions(),
        &[
            Instruction::rri(Opcode::Addi, 1, 0, 3),
            Instruction::rrr(Opcode::Mulu, 2, 1, 1).at(1),
        ]
    );
}

#[test]
fn empty_program_file() {
    let file = file_with("[]");
    assert!(load_program(file.path()).unwrap().is_empty());
}

#[test]
fn missing_program_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_program(dir.path().join("absent.json")),
        Err(ProgramError::Io(_))
    ));
}

#[test]
fn loads_partial_config() {
    let file = file_with(r#"{ "pipeline": { "issue_queue_size": 4, "rollback_width": 1 } }"#);
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.pipeline.issue_queue_size, 4);
    assert_eq!(config.pipeline.rollback_width, Some(1));
    assert_eq!(config.pipeline.active_list_size, 32);
}

#[test]
fn invalid_config_file() {
    let file = file_with(r#"{ "pipeline": { "commit_width": 0 } }"#);
    assert_eq!(load_config(file.path()), Err(ConfigError::Zero("commit_width")));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_config(dir.path().join("absent.json")),
        Err(ConfigError::Io(_))
    ));
}
