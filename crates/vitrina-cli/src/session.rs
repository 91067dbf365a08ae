//! On-disk cart sessions.
//!
//! Each session is one `<id>.json` file under the configured cart directory
//! holding a serialized [`CartSnapshot`]. A session that has never been saved
//! loads as an empty cart.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use vitrina_core::{CartSnapshot, CartStore};

#[derive(Debug, Clone)]
pub(crate) struct CartSessions {
    dir: PathBuf,
}

impl CartSessions {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns `requested` after validating it, or a freshly minted id.
    pub(crate) fn resolve_id(requested: Option<&str>) -> anyhow::Result<String> {
        match requested {
            Some(id) => {
                validate_id(id)?;
                Ok(id.to_owned())
            }
            None => Ok(uuid::Uuid::new_v4().to_string()),
        }
    }

    pub(crate) fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Loads the cart for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub(crate) fn load(&self, id: &str) -> anyhow::Result<CartStore> {
        let path = self.path_for(id);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(session = id, "no saved cart, starting empty");
                return Ok(CartStore::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        let snapshot: CartSnapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse cart file {}", path.display()))?;
        Ok(CartStore::from_snapshot(snapshot))
    }

    /// Writes the cart for `id`, creating the cart directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub(crate) fn save(&self, id: &str, cart: &CartStore) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let path = self.path_for(id);
        let json = serde_json::to_vec_pretty(&cart.snapshot())?;
        write_replace(&path, &json)?;
        tracing::debug!(session = id, items = cart.len(), "cart saved");
        Ok(())
    }
}

fn write_replace(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents)
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

// Session ids become file names.
fn validate_id(id: &str) -> anyhow::Result<()> {
    let valid = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        anyhow::bail!(
            "invalid session id '{id}': use 1-64 letters, digits, '-' or '_'"
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
