#![allow(dead_code)]

use assert_cmd::Command;
use bitstore::areas::backend::FsBackend;
use bitstore::areas::database::Database;
use bitstore::areas::index::Index;
use bitstore::artifacts::core::config::Config;
use bitstore::artifacts::index::index_entry::IndexEntry;
use bitstore::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

pub fn run_bitstore_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitstore").expect("Failed to find bitstore binary");
    cmd.current_dir(dir).args(args);
    cmd
}

/// Run a command expected to print a single object id and return it
pub fn run_for_object_id(dir: &Path, args: &[&str]) -> String {
    let output = run_bitstore_command(dir, args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output)
        .expect("Object id is not valid UTF-8")
        .trim()
        .to_string()
}

/// Open the object database of a repository rooted at `dir`
pub fn database(dir: &Path) -> Database<FsBackend> {
    let config = Config::default();
    Database::open(&config.objects_path(dir), &config)
}

pub fn index_entry(path: &str, oid: &ObjectId, mode: u32) -> IndexEntry {
    IndexEntry {
        ctime_sec: 1_700_000_000,
        mtime_sec: 1_700_000_000,
        mode,
        uid: 1000,
        gid: 1000,
        oid: oid.clone(),
        flags: IndexEntry::flags_for_path(path),
        path: path.to_string(),
        ..Default::default()
    }
}

/// Write `entries` as the repository's index file
pub fn write_index(dir: &Path, entries: &[IndexEntry]) {
    let index_path = Config::default().index_path(dir);
    std::fs::create_dir_all(index_path.parent().expect("Index path has no parent"))
        .expect("Failed to create git dir");
    std::fs::write(&index_path, Index::encode(entries).expect("Failed to encode index"))
        .expect("Failed to write index");
}

/// All regular files below `dir`, recursively
pub fn walk_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(walk_files(&path)?);
        } else {
            files.push(path);
        }
    }
    Ok(files)
}
