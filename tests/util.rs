//! Shared test utilities for integration tests
//!
//! Provides common fixture creation and helper functions
//! used across multiple test files.

#![allow(dead_code)]

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use doubtsift::analysis::{Corpus, CorpusEntry};

/// Launch the binary inside `dir` with no inherited config overrides
pub fn dsift(dir: &assert_fs::TempDir) -> Command
{
    let mut cmd = Command::cargo_bin("dsift").expect("dsift binary");
    cmd.current_dir(dir.path())
        .env_remove("DOUBTSIFT_LOG")
        .env_remove("DOUBTSIFT_STORE_PATH")
        .env_remove("DOUBTSIFT_CATALOG_PATH")
        .arg("--no-color");
    cmd
}

/// Empty project directory with a `data/` folder for the store
pub fn make_workspace() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("data")
        .create_dir_all()
        .expect("mkdir data");
    tmp
}

/// One near-duplicate of the quicksort question plus nine unrelated doubts
pub fn quicksort_corpus() -> Corpus
{
    let rows = [
        ("q1", "Quicksort partition around pivot", "How does quicksort partition an array around a pivot"),
        ("u1", "TCP three way handshake", "Why does TCP need three packets to open a connection"),
        ("u2", "Python decorators", "What happens when a decorator wraps a function in Python"),
        ("u3", "SQL joins", "Difference between inner join and left outer join"),
        ("u4", "Deadlock conditions", "Which four conditions must hold for a deadlock"),
        ("u5", "Git rebase", "When should I rebase instead of merge a feature branch"),
        ("u6", "Polymorphism in Java", "Explain runtime polymorphism with overriding"),
        ("u7", "Probability puzzle", "Two dice are rolled, chance the sum is seven"),
        ("u8", "React hooks", "Why can hooks only be called at the top level"),
        ("u9", "Gradient descent", "How does the learning rate affect convergence"),
    ];

    Corpus::new(
        rows.iter()
            .map(|(id, title, description)| CorpusEntry::new(*id, *title, *description))
            .collect(),
    )
    .expect("valid corpus")
}
