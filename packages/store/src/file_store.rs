//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists every key
//! as its own file under a base directory. It is used on desktop and mobile
//! platforms to retain users, sessions and overlays across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── supewatch_user.json      # session identity
//! ├── supewatch_users.json     # registered users
//! ├── incidents.json
//! ├── news.json
//! └── supewatch_supes.json     # supe overrides
//! ```
//!
//! Characters outside `[A-Za-z0-9._-]` in a key are replaced by `_` when
//! building the file name. Writes go to `<name>.json.tmp` and are renamed into
//! place, so a reader never sees a half-written blob.
//!
//! ## Platform data directories
//!
//! [`FileStore::default_base`] uses [`dirs::data_dir()`] when available:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/supewatch/` |
//! | Linux | `~/.local/share/supewatch/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\supewatch\` |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Platform data directory joined with `supewatch`, or `./supewatch`.
    pub fn default_base() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("supewatch")
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: String) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp, value) {
            tracing::warn!("Failed to write {}: {}", tmp.display(), e);
            return;
        }
        if let Err(e) = std::fs::rename(&tmp, &path) {
            tracing::warn!("Failed to move {} into place: {}", path.display(), e);
            let _ = std::fs::remove_file(&tmp);
        }
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}
