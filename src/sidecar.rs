//! Sidecar persistence.
//!
//! The engine returns strings; writing them next to the code they
//! describe is this collaborator's job, passed into the invocation
//! rather than kept as process-wide state. The store enforces the
//! generate-once policy: a stub is never refreshed once written, so
//! callers that need regeneration must go through the explicit
//! delete-before-regenerate path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::Result;

/// The sidecar file extension.
pub const SIDECAR_EXTENSION: &str = "pyi";

/// What a store call did with the text it was handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The sidecar did not exist and was created.
    Written(PathBuf),
    /// A sidecar was already present; the new text was discarded.
    SkippedExisting(PathBuf),
}

/// Writes generated stub text into a sidecar directory.
#[derive(Debug, Clone)]
pub struct SidecarStore {
    out_dir: PathBuf,
}

impl SidecarStore {
    /// Creates a store rooted at `out_dir`. The directory is created on
    /// first write.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// The sidecar path for a module stem.
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.out_dir.join(format!("{}.{}", stem, SIDECAR_EXTENSION))
    }

    /// Write `text` as the sidecar for `stem` only if none exists yet.
    ///
    /// The text lands in a temporary file in the target directory and is
    /// persisted with no-clobber semantics, so the existence check and
    /// the write are one atomic step even with concurrent generators.
    pub fn write_if_absent(&self, stem: &str, text: &str) -> Result<WriteOutcome> {
        let target = self.path_for(stem);
        fs::create_dir_all(&self.out_dir)?;

        let mut staged = NamedTempFile::new_in(&self.out_dir)?;
        staged.write_all(text.as_bytes())?;

        match staged.persist_noclobber(&target) {
            Ok(_) => {
                info!(path = %target.display(), "wrote sidecar stub");
                Ok(WriteOutcome::Written(target))
            }
            Err(err) if err.error.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!(path = %target.display(), "sidecar already present, skipped");
                Ok(WriteOutcome::SkippedExisting(target))
            }
            Err(err) => Err(err.error.into()),
        }
    }

    /// Delete-before-regenerate: remove any existing sidecar for `stem`
    /// and write `text` in its place.
    pub fn refresh(&self, stem: &str, text: &str) -> Result<PathBuf> {
        let target = self.path_for(stem);
        match fs::remove_file(&target) {
            Ok(()) => debug!(path = %target.display(), "removed stale sidecar"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        fs::create_dir_all(&self.out_dir)?;

        let mut staged = NamedTempFile::new_in(&self.out_dir)?;
        staged.write_all(text.as_bytes())?;
        staged.persist(&target).map_err(|err| err.error)?;

        info!(path = %target.display(), "refreshed sidecar stub");
        Ok(target)
    }

    /// The store's root directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}
