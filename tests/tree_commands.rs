use assert_fs::fixture::{FileWriteBin, PathChild};
use bitstore::artifacts::objects::object::Packable;
use bitstore::artifacts::objects::object_id::ObjectId;
use bitstore::artifacts::objects::object_type::ObjectType;
use bitstore::artifacts::objects::tree::{Tree, TreeEntry};
use predicates::prelude::*;
use rstest::{fixture, rstest};

mod common;

/// Repository holding `README.md`, `run.sh` and `src/lib.rs`, returning the
/// root tree id
#[fixture]
fn nested_tree() -> (assert_fs::TempDir, ObjectId) {
    let dir = assert_fs::TempDir::new().expect("Failed to create temp dir");
    let database = common::database(dir.path());

    let readme = database.write(ObjectType::Blob, b"# readme\n").unwrap();
    let script = database.write(ObjectType::Blob, b"#!/bin/sh\n").unwrap();
    let lib = database.write(ObjectType::Blob, b"pub mod x;\n").unwrap();

    let src = [TreeEntry::new(0o100644, "lib.rs".to_string(), lib)]
        .into_iter()
        .collect::<Tree>();
    let src = database
        .write(ObjectType::Tree, &src.serialize().unwrap())
        .unwrap();

    let root = [
        TreeEntry::new(0o100644, "README.md".to_string(), readme),
        TreeEntry::new(0o100755, "run.sh".to_string(), script),
        TreeEntry::new(0o40000, "src".to_string(), src),
    ]
    .into_iter()
    .collect::<Tree>();
    let root = database
        .write(ObjectType::Tree, &root.serialize().unwrap())
        .unwrap();

    (dir, root)
}

#[rstest]
fn list_top_level_entries(nested_tree: (assert_fs::TempDir, ObjectId)) {
    let (dir, root) = nested_tree;
    let entries = common::database(dir.path())
        .read_tree(root.as_ref())
        .unwrap()
        .into_entries()
        .collect::<Vec<_>>();

    let expected = format!(
        "100644 blob {}\tREADME.md\n100755 blob {}\trun.sh\n040000 tree {}\tsrc\n",
        entries[0].oid, entries[1].oid, entries[2].oid
    );

    common::run_bitstore_command(dir.path(), &["ls-tree", &root.as_ref()[..7]])
        .assert()
        .success()
        .stdout(expected.clone());

    // pretty printing a tree uses the same format
    common::run_bitstore_command(dir.path(), &["cat-file", "pretty", root.as_ref()])
        .assert()
        .success()
        .stdout(expected);
}

#[rstest]
fn list_all_blobs_recursively(nested_tree: (assert_fs::TempDir, ObjectId)) {
    let (dir, root) = nested_tree;

    common::run_bitstore_command(dir.path(), &["ls-tree", "-r", root.as_ref()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\tsrc/lib.rs\n"))
        .stdout(predicate::str::contains("\tsrc\n").not())
        .stdout(predicate::str::contains("100755 blob"));
}

#[rstest]
fn hash_object_accepts_tree_payloads(nested_tree: (assert_fs::TempDir, ObjectId)) {
    let (dir, root) = nested_tree;
    let payload = common::database(dir.path())
        .read_tree(root.as_ref())
        .unwrap()
        .serialize()
        .unwrap();
    dir.child("tree.bin").write_binary(&payload).unwrap();

    let oid = common::run_for_object_id(dir.path(), &["hash-object", "-t", "tree", "tree.bin"]);

    pretty_assertions::assert_eq!(oid, root.to_string());
}

#[rstest]
fn tree_entry_ceiling_is_configurable(nested_tree: (assert_fs::TempDir, ObjectId)) {
    let (dir, root) = nested_tree;

    common::run_bitstore_command(
        dir.path(),
        &["--max-tree-entries", "2", "ls-tree", root.as_ref()],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("malformed tree"));
}

#[rstest]
fn ls_tree_rejects_blobs(nested_tree: (assert_fs::TempDir, ObjectId)) {
    let (dir, _) = nested_tree;
    let blob = common::database(dir.path())
        .write(ObjectType::Blob, b"# readme\n")
        .unwrap();

    common::run_bitstore_command(dir.path(), &["ls-tree", blob.as_ref()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected tree object, got blob"));
}
