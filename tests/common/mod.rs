//! Common test utilities for wsbundle integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A bundle directory on disk for integration tests
pub struct TestBundle {
    /// Temporary directory, removed on drop
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to bundle root
    pub path: PathBuf,
}

impl TestBundle {
    /// Create a new empty bundle directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the bundle
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write a source file carrying the notebook header
    #[allow(dead_code)]
    pub fn touch_notebook(&self, path: &str) {
        self.write_file(path, "# Databricks notebook source\n");
    }

    /// Write an empty file
    #[allow(dead_code)]
    pub fn touch_empty(&self, path: &str) {
        self.write_file(path, "");
    }
}

/// Command running the wsbundle binary
#[allow(dead_code)]
pub fn wsbundle_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_wsbundle"));
    cmd.env_remove("RUST_LOG").env_remove("WSBUNDLE_ENVIRONMENT");
    cmd
}
