//! Object store
//!
//! Blobs are stored whole under `objects/<sha256 hex>`, gzip-compressed. The
//! store is content-addressed and performs no reference counting: callers
//! decide when an object is no longer reachable and may be removed.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.as_ref())
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Store raw content and return its id
    ///
    /// Writing content that is already present leaves the store untouched.
    pub fn store(&self, data: &[u8]) -> anyhow::Result<ObjectId> {
        let object_id = ObjectId::hash(data);
        let object_path = self.object_path(&object_id);

        if !object_path.exists() {
            let compressed = Self::compress(data)?;
            write_atomically(&object_path, &compressed)?;
            log::debug!("stored object {}", object_id.to_short_oid());
        }

        Ok(object_id)
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(&object_content)
    }

    /// Delete an object file; an already missing object is not an error
    pub fn remove(&self, object_id: &ObjectId) -> anyhow::Result<()> {
        let object_path = self.object_path(object_id);

        match std::fs::remove_file(&object_path) {
            Ok(()) => {
                log::debug!("removed object {}", object_id.to_short_oid());
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error).context(format!(
                "Unable to remove object file {}",
                object_path.display()
            )),
        }
    }

    fn compress(data: &[u8]) -> anyhow::Result<Bytes> {
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(Bytes::from)
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: &[u8]) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::GzDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }
}

fn generate_temp_name() -> String {
    format!("tmp-{}", rand::random::<u32>())
}

/// Write a file through a temporary sibling renamed into place
pub(crate) fn write_atomically(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .context(format!("Invalid file path {}", path.display()))?;
    std::fs::create_dir_all(dir).context(format!("Unable to create directory {}", dir.display()))?;

    let temp_path = dir.join(generate_temp_name());
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .context(format!("Unable to open file {}", temp_path.display()))?;

    file.write_all(content)
        .context(format!("Unable to write file {}", temp_path.display()))?;
    drop(file);

    std::fs::rename(&temp_path, path)
        .context(format!("Unable to rename file to {}", path.display()))?;

    Ok(())
}
