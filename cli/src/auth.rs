use crate::config::CONFIG_DIR;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const AUTH_FILE_NAME: &str = "auth";

/// The API token stored under a config directory.
pub struct Auth {
    dir: PathBuf,
}

impl Default for Auth {
    fn default() -> Self {
        Self::in_dir(&CONFIG_DIR)
    }
}

impl Auth {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join(AUTH_FILE_NAME)
    }

    pub fn read_stored_token(&self) -> Option<String> {
        let token = fs::read_to_string(self.file_path()).ok()?;
        let token = token.trim();
        match token.is_empty() {
            true => None,
            false => Some(token.to_owned()),
        }
    }

    pub fn store_token(&self, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.file_path(), value.trim())
    }

    /// Removes the stored token. Succeeds if there was none.
    pub fn clear_token(&self) -> io::Result<()> {
        match fs::remove_file(self.file_path()) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }
}
