//! Artifact writer - owns the output directory
//!
//! Every artifact is written to `<name>.tmp`, synced, and renamed over
//! `<name>`, so a reader never observes a half-written chart or table.
//! Same-named artifacts from earlier runs are overwritten (last run wins).

mod artifact_record;

pub use artifact_record::ArtifactRecord;

use crate::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes report artifacts into one directory and keeps an inventory.
#[derive(Debug)]
pub struct ArtifactWriter {
    dir: PathBuf,
    written: Vec<ArtifactRecord>,
}

impl ArtifactWriter {
    /// Open `dir` for writing, creating it and its parents if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be created.
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Destination directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Durably write `content` as `name` and return its path.
    ///
    /// The file is fully written and synced, and on Unix the directory entry
    /// created by the rename is synced too, before this returns.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `name` is not a plain file name
    /// - [`Error::Io`] on write, sync or rename failure
    pub fn save(&mut self, name: &str, content: &[u8]) -> Result<PathBuf> {
        validate_name(name)?;

        let path = self.dir.join(name);
        let temp_path = self.dir.join(format!("{name}.tmp"));

        if let Err(e) = write_synced(&temp_path, content) {
            fs::remove_file(&temp_path).ok();
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp_path, &path) {
            fs::remove_file(&temp_path).ok();
            return Err(Error::Io(e));
        }
        sync_dir(&self.dir)?;

        let record = ArtifactRecord::new(name, &path, content.len() as u64);
        tracing::info!(path = %path.display(), bytes = record.size_bytes(), "saved artifact");

        match self.written.iter_mut().find(|r| r.name() == name) {
            Some(existing) => *existing = record,
            None => self.written.push(record),
        }

        Ok(path)
    }

    /// Artifacts written so far, in save order.
    #[must_use]
    pub fn written(&self) -> &[ArtifactRecord] {
        &self.written
    }

    /// Consume the writer and return its inventory.
    #[must_use]
    pub fn into_written(self) -> Vec<ArtifactRecord> {
        self.written
    }
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    File::open(dir)?.sync_all()?;
    Ok(())
}

// Directory handles cannot be opened for syncing here.
#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().is_some_and(|f| f == name);

    if plain {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "artifact name {name:?} must be a plain file name"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("bench").join("out");
        let writer = ArtifactWriter::create(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(writer.written().is_empty());
    }

    #[test]
    fn test_save_writes_and_records() {
        let tmp = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::create(tmp.path()).unwrap();

        let path = writer.save("summary_table.md", b"| a |\n").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"| a |\n");
        assert!(!tmp.path().join("summary_table.md.tmp").exists());
        assert_eq!(writer.written().len(), 1);
        assert_eq!(writer.written()[0].size_bytes(), 6);
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let tmp = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::create(tmp.path()).unwrap();

        writer.save("chart.svg", b"first").unwrap();
        let path = writer.save("chart.svg", b"second").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "second");
        assert_eq!(writer.written().len(), 1);
    }

    #[test]
    fn test_save_leaves_only_final_file_in_dir() {
        let tmp = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::create(tmp.path()).unwrap();

        writer.save("ef_vs_qps.svg", b"<svg/>").unwrap();
        writer.save("build_time.svg", b"<svg/>").unwrap();

        let mut names: Vec<String> = fs::read_dir(writer.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["build_time.svg", "ef_vs_qps.svg"]);
        assert_eq!(writer.dir(), tmp.path());
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_dir_on_existing_and_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(sync_dir(tmp.path()).is_ok());
        assert!(matches!(sync_dir(&tmp.path().join("gone")), Err(Error::Io(_))));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let tmp = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::create(tmp.path()).unwrap();

        for bad in ["", "..", "../escape.svg", "sub/chart.svg"] {
            assert!(matches!(writer.save(bad, b"x"), Err(Error::Config(_))), "{bad}");
        }
    }
}
