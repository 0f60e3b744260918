use cairn::artifacts::changes::change::ChangeTag;
use cairn::artifacts::objects::object_id::ObjectId;
use cairn::errors::RepositoryError;
use common::file::write_generated_files;
use common::sandbox::{Sandbox, sandbox};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

mod common;

#[rstest]
fn indexing_unchanged_content_twice_is_a_no_op(mut sandbox: Sandbox) {
    sandbox.write("a.txt", "alpha");

    sandbox.stage(&["a.txt"]);
    let index_once = sandbox.index_file_content();
    let objects_once = sandbox.object_count();

    sandbox.stage(&["a.txt"]);
    sandbox.stage(&["a.txt"]);

    assert_eq!(sandbox.index_file_content(), index_once);
    assert_eq!(sandbox.object_count(), objects_once);
    assert_eq!(sandbox.repository.index().len(), 1);
}

#[rstest]
fn indexing_saved_content_adds_no_entry_and_no_object(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("1.txt", "1 content")]);
    let objects = sandbox.object_count();

    sandbox.stage(&["1.txt"]);

    assert!(sandbox.repository.index().is_empty());
    assert_eq!(sandbox.object_count(), objects);
}

#[rstest]
fn reverting_a_staged_edit_drops_the_entry_and_its_object(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("1.txt", "1 content")]);
    let saved_objects = sandbox.object_count();

    sandbox.write("1.txt", "1 edited");
    sandbox.stage(&["1.txt"]);
    let entry = sandbox
        .repository
        .index()
        .entry_by_path(Path::new("1.txt"))
        .cloned()
        .unwrap();
    assert_eq!(entry.tag(), ChangeTag::Modified);
    assert_eq!(sandbox.object_count(), saved_objects + 1);

    sandbox.write("1.txt", "1 content");
    sandbox.stage(&["1.txt"]);

    assert!(sandbox.repository.index().is_empty());
    assert_eq!(sandbox.object_count(), saved_objects);
    assert!(
        sandbox
            .repository
            .database()
            .contains(&ObjectId::hash(b"1 content"))
    );
}

#[rstest]
fn restaging_an_edited_file_frees_the_superseded_object(mut sandbox: Sandbox) {
    sandbox.write("a.txt", "first");
    sandbox.stage(&["a.txt"]);

    sandbox.write("a.txt", "second");
    sandbox.stage(&["a.txt"]);

    let database = sandbox.repository.database();
    assert!(!database.contains(&ObjectId::hash(b"first")));
    assert!(database.contains(&ObjectId::hash(b"second")));
    assert_eq!(sandbox.repository.index().len(), 1);
}

#[rstest]
fn staging_a_directory_stages_every_file_below_it(mut sandbox: Sandbox) {
    let files = write_generated_files(&sandbox.root().join("docs"), 3);
    sandbox.write("docs/nested/deep.txt", "deep");
    sandbox.write("outside.txt", "outside");

    sandbox.stage(&["docs"]);

    let index = sandbox.repository.index();
    assert_eq!(index.len(), files.len() + 1);
    assert!(index.entries().all(|entry| entry.tag() == ChangeTag::Created));
    assert!(index.entry_by_path(Path::new("outside.txt")).is_none());
}

#[rstest]
fn staging_rejects_paths_outside_the_working_directory(mut sandbox: Sandbox) {
    let escape = sandbox.repository.index_file("../elsewhere.txt").unwrap_err();
    let metadata = sandbox.repository.index_file(".repository/head").unwrap_err();
    let missing = sandbox.repository.index_file("missing.txt").unwrap_err();

    assert!(matches!(escape, RepositoryError::PathEscapesRoot(_)));
    assert!(matches!(metadata, RepositoryError::MetadataPath(_)));
    assert!(matches!(missing, RepositoryError::PathNotFound(_)));
    assert!(escape.is_validation());
}

#[rstest]
fn removing_a_saved_file_stages_its_removal_once(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "a"), ("dir/b.txt", "b")]);

    sandbox.repository.remove_file("dir/b.txt").unwrap();
    let index_after_first = sandbox.repository.index().entries().cloned().collect::<Vec<_>>();
    sandbox.repository.remove_file("dir/b.txt").unwrap();

    assert!(!sandbox.exists("dir/b.txt"));
    assert!(!sandbox.exists("dir"));
    assert_eq!(index_after_first.len(), 1);
    assert_eq!(index_after_first[0].tag(), ChangeTag::Removed);
    assert_eq!(
        sandbox.repository.index().entries().cloned().collect::<Vec<_>>(),
        index_after_first
    );
}

#[rstest]
fn removing_a_staged_only_file_leaves_no_trace(mut sandbox: Sandbox) {
    sandbox.write("draft.txt", "draft");
    sandbox.stage(&["draft.txt"]);

    sandbox.repository.remove_file("draft.txt").unwrap();

    assert!(!sandbox.exists("draft.txt"));
    assert!(sandbox.repository.index().is_empty());
    assert!(
        !sandbox
            .repository
            .database()
            .contains(&ObjectId::hash(b"draft"))
    );
}

#[rstest]
fn removing_a_directory_removes_every_tracked_file(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("dir/a.txt", "a"), ("dir/sub/b.txt", "b")]);

    sandbox.repository.remove_file("dir").unwrap();

    assert!(!sandbox.exists("dir"));
    assert_eq!(sandbox.repository.index().len(), 2);
    assert!(sandbox.repository.index().entries().all(|entry| entry.is_removal()));
}

#[rstest]
fn staging_rejects_names_that_do_not_fit_on_one_line(mut sandbox: Sandbox) {
    sandbox.write("a\nb.txt", "content");
    sandbox.write("docs/c\rd.txt", "content");

    let file = sandbox.repository.index_file("a\nb.txt").unwrap_err();
    let directory = sandbox.repository.index_file("docs").unwrap_err();

    assert!(matches!(file, RepositoryError::InvalidPath(_)));
    assert!(matches!(directory, RepositoryError::InvalidPath(_)));
    assert!(file.is_validation());
    assert!(sandbox.repository.index().is_empty());

    sandbox.repository.save_index().unwrap();
    sandbox.reopen();
    assert!(sandbox.repository.index().is_empty());
}

#[cfg(target_os = "linux")]
#[rstest]
fn staging_rejects_names_that_are_not_utf8(mut sandbox: Sandbox) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let name = Path::new(OsStr::from_bytes(b"caf\xe9.txt"));
    std::fs::write(sandbox.root().join(name), "content").unwrap();

    let error = sandbox.repository.index_file(name).unwrap_err();

    assert!(matches!(error, RepositoryError::InvalidPath(_)));
    assert!(sandbox.repository.index().is_empty());
}

#[rstest]
fn resolving_a_conflict_frees_its_temporary_object(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "ours")]);
    let theirs = sandbox.store_object("theirs");
    sandbox.write_conflicts(&[("a.txt", &theirs)]);

    sandbox.write("a.txt", "resolved");
    sandbox.stage(&["a.txt"]);

    let database = sandbox.repository.database();
    assert!(!database.contains(&theirs));
    assert!(database.contains(&ObjectId::hash(b"resolved")));
    assert_eq!(
        sandbox
            .repository
            .index()
            .entry_by_path(Path::new("a.txt"))
            .map(|entry| entry.tag()),
        Some(ChangeTag::Modified)
    );
}

#[rstest]
fn resolving_a_conflict_keeps_objects_recorded_by_checkpoints(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "ours"), ("b.txt", "base")]);
    let ours = ObjectId::hash(b"ours");
    sandbox.write_conflicts(&[("b.txt", &ours)]);

    sandbox.write("b.txt", "resolved");
    sandbox.stage(&["b.txt"]);

    assert!(sandbox.repository.database().contains(&ours));
    assert_eq!(sandbox.read("a.txt"), "ours");
}

#[rstest]
fn saving_refuses_unresolved_conflicts(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "ours")]);
    let theirs = sandbox.store_object("theirs");
    sandbox.write_conflicts(&[("a.txt", &theirs)]);

    let error = sandbox.repository.create_save("s1").unwrap_err();

    match error {
        RepositoryError::UnresolvedConflicts(paths) => assert_eq!(paths, vec!["a.txt"]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sandbox.repository.index().len(), 1);
}
