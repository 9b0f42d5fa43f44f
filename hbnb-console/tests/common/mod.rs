//! Shared test helpers for console tests.

#![allow(dead_code)]

use hbnb_console::{Console, Shell};
use hbnb_storage::FileStorage;
use std::path::PathBuf;
use tempfile::TempDir;

/// A console over an empty store in a fresh temp directory.
pub fn temp_console() -> (TempDir, Console) {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(store_path(&dir)).unwrap();
    (dir, Console::new(storage))
}

/// A shell writing into an in-memory buffer.
pub fn temp_shell() -> (TempDir, Shell<Vec<u8>>) {
    let (dir, console) = temp_console();
    (dir, Shell::new(console, Vec::new()))
}

pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("objects.json")
}

/// Runs `line` and returns what it printed, without the trailing newline.
pub fn run(shell: &mut Shell<Vec<u8>>, line: &str) -> String {
    shell.output_mut().clear();
    shell.execute(line).unwrap();
    let out = std::mem::take(shell.output_mut());
    String::from_utf8(out).unwrap().trim_end_matches('\n').to_owned()
}
