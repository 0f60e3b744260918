use assert_cmd::Command;
use assert_fs::TempDir;
use cairn::config::DEFAULT_BRANCH_ENV;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_cairn_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("cairn").expect("Failed to find the cairn binary");
    cmd.current_dir(dir)
        .args(args)
        .env_remove(DEFAULT_BRANCH_ENV)
        .env("NO_COLOR", "1");
    cmd
}
