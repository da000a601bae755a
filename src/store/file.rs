use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::election::DOCUMENT_KEY;

use super::{DocumentStore, Result};

/// Keeps the document as `<dir>/<key>.json`.
///
/// Writes go to a uniquely named temporary file in the same directory which
/// is then renamed over the target, so readers see either the old document
/// or the new one, even with several writing processes.
pub struct JsonFileStore {
    dir: PathBuf,
    path: PathBuf,
}

impl JsonFileStore {
    /// Use the standard document key inside `dir`, creating `dir` if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_key(dir, DOCUMENT_KEY)
    }

    pub fn open_key(dir: impl AsRef<Path>, key: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            path: dir.join(format!("{key}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(contents.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
