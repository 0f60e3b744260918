use crate::common::file::{FileSpec, count_objects, read_file, write_file};
use assert_fs::TempDir;
use cairn::areas::repository::Repository;
use cairn::artifacts::checkpoint::checkpoint::Checkpoint;
use cairn::artifacts::objects::object_id::ObjectId;
use rstest::fixture;
use std::path::Path;

/// A freshly created repository in a temporary directory
pub struct Sandbox {
    pub dir: TempDir,
    pub repository: Repository,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repository = Repository::create(dir.path()).expect("Failed to create repository");

        Sandbox { dir, repository }
    }

    pub fn root(&self) -> &Path {
        self.repository.path()
    }

    pub fn write(&self, path: &str, content: &str) {
        write_file(FileSpec::new(self.root().join(path), content.to_string()));
    }

    pub fn read(&self, path: &str) -> String {
        read_file(&self.root().join(path))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.root().join(path).exists()
    }

    pub fn delete(&self, path: &str) {
        std::fs::remove_file(self.root().join(path)).expect("Failed to delete file");
    }

    pub fn stage(&mut self, paths: &[&str]) {
        for path in paths {
            self.repository
                .index_file(path)
                .expect("Failed to stage file");
        }
        self.repository.save_index().expect("Failed to write index");
    }

    /// Write, stage and save files in one go
    pub fn save_files(&mut self, message: &str, files: &[(&str, &str)]) -> Checkpoint {
        for (path, content) in files {
            self.write(path, content);
        }
        let paths = files.iter().map(|(path, _)| *path).collect::<Vec<_>>();
        self.stage(&paths);

        self.repository
            .create_save(message)
            .expect("Failed to save")
    }

    pub fn reopen(&mut self) {
        self.repository = Repository::open(self.dir.path()).expect("Failed to reopen repository");
    }

    pub fn object_count(&self) -> usize {
        count_objects(self.root())
    }

    /// Store `content` in the object store without staging anything
    pub fn store_object(&self, content: &str) -> ObjectId {
        self.repository
            .database()
            .store(content.as_bytes())
            .expect("Failed to store object")
    }

    /// Replace the index with conflict entries and reload the repository
    pub fn write_conflicts(&mut self, conflicts: &[(&str, &ObjectId)]) {
        let mut content = String::from("Tracked files:\n\n");
        for (path, oid) in conflicts {
            content.push_str(&format!("{path}\t(conflicted)\n{oid}\n"));
        }

        std::fs::write(self.root().join(".repository").join("index"), content)
            .expect("Failed to write index");
        self.reopen();
    }

    pub fn index_file_content(&self) -> String {
        read_file(&self.root().join(".repository").join("index"))
    }
}

#[fixture]
pub fn sandbox() -> Sandbox {
    Sandbox::new()
}
