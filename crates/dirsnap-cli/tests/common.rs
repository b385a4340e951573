//! Shared fixture for the CLI integration tests.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use dirsnap_index::Database;
use dirsnap_testing::fixtures::leaves;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    config_path: PathBuf,
    db_path: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        let db_path = temp_dir.path().join("data").join("dirsnap.db");

        Self {
            _temp_dir: temp_dir,
            config_path,
            db_path,
        }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Write a config with one site per `(name, address)` pair.
    pub fn write_config(&self, sites: &[(&str, &str)]) {
        let mut content = format!("database = {:?}\n", self.db_path.display().to_string());
        for (name, address) in sites {
            content.push_str(&format!(
                "\n[[sites]]\nname = {:?}\naddress = {:?}\nconnect_timeout = 1\n",
                name, address
            ));
        }
        fs::write(&self.config_path, content).expect("Failed to write config");
    }

    /// Store a snapshot for `site` directly, bypassing any crawl.
    pub fn seed(&self, site: &str, paths: &[&str]) {
        let db = Database::open(&self.db_path).expect("Failed to open database");
        db.replace_directories(site, &leaves(paths))
            .expect("Failed to seed snapshot");
    }

    pub fn database(&self) -> Database {
        Database::open(&self.db_path).expect("Failed to open database")
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dirsnap");
        cmd.env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }
}
