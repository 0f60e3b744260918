use cairn::artifacts::objects::object_id::ObjectId;
use cairn::errors::RepositoryError;
use common::sandbox::{Sandbox, sandbox};
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn restoring_from_head_prefers_staged_content_and_unstages_it(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "saved"), ("b.txt", "other")]);
    sandbox.write("a.txt", "staged");
    sandbox.stage(&["a.txt"]);
    sandbox.write("a.txt", "scribbled");

    sandbox.repository.restore("HEAD", "a.txt").unwrap();

    assert_eq!(sandbox.read("a.txt"), "staged");
    assert!(sandbox.repository.index().is_empty());
    assert_eq!(sandbox.read("b.txt"), "other");
}

#[rstest]
fn restoring_never_frees_saved_objects(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "shared content")]);
    sandbox.write("copy.txt", "shared content");
    sandbox.stage(&["copy.txt"]);

    sandbox.repository.restore("HEAD", "copy.txt").unwrap();

    assert!(sandbox.repository.index().is_empty());
    assert!(
        sandbox
            .repository
            .database()
            .contains(&ObjectId::hash(b"shared content"))
    );
    assert_eq!(sandbox.read("a.txt"), "shared content");
}

#[rstest]
fn restoring_from_an_older_checkpoint_keeps_head(mut sandbox: Sandbox) {
    let s0 = sandbox.save_files("s0", &[("a.txt", "old")]);
    let s1 = sandbox.save_files("s1", &[("a.txt", "new")]);

    sandbox.repository.restore(s0.id().as_ref(), "a.txt").unwrap();

    assert_eq!(sandbox.read("a.txt"), "old");
    assert_eq!(sandbox.repository.current_checkpoint_id(), Some(s1.id()));
    assert!(!sandbox.repository.is_detached());
}

#[rstest]
fn restoring_a_directory_replaces_everything_under_it(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("dir/1.txt", "one"), ("dir/sub/2.txt", "two"), ("top.txt", "top")]);
    sandbox.write("dir/1.txt", "changed");
    sandbox.write("dir/extra.txt", "extra");
    sandbox.write("top.txt", "top changed");
    sandbox.stage(&["top.txt"]);

    sandbox.repository.restore("master", "dir").unwrap();

    assert_eq!(sandbox.read("dir/1.txt"), "one");
    assert_eq!(sandbox.read("dir/sub/2.txt"), "two");
    assert!(!sandbox.exists("dir/extra.txt"));
    assert_eq!(sandbox.read("top.txt"), "top changed");
    assert_eq!(sandbox.repository.index().len(), 1);
}

#[rstest]
fn restoring_an_unknown_path_fails(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "a")]);

    let error = sandbox.repository.restore("HEAD", "nowhere.txt").unwrap_err();

    assert!(matches!(error, RepositoryError::PathNotFound(_)));
}

#[rstest]
fn restoring_an_untracked_file_leaves_it_alone(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "a")]);
    sandbox.write("notes.txt", "never saved");

    let error = sandbox.repository.restore("HEAD", "notes.txt").unwrap_err();

    assert!(matches!(error, RepositoryError::PathNotFound(_)));
    assert_eq!(sandbox.read("notes.txt"), "never saved");
}

#[rstest]
fn objects_recorded_earlier_in_the_session_are_kept(mut sandbox: Sandbox) {
    sandbox.save_files("s0", &[("a.txt", "a")]);
    sandbox.write("draft.txt", "first");
    sandbox.stage(&["draft.txt"]);
    sandbox.write("draft.txt", "second");
    sandbox.stage(&["draft.txt"]);
    sandbox.repository.create_save("s1").unwrap();

    sandbox.write("copy.txt", "second");
    sandbox.stage(&["copy.txt"]);
    sandbox.repository.restore("HEAD", "copy.txt").unwrap();

    let database = sandbox.repository.database();
    assert!(!database.contains(&ObjectId::hash(b"first")));
    assert!(database.contains(&ObjectId::hash(b"second")));
    assert_eq!(sandbox.read("draft.txt"), "second");
}
