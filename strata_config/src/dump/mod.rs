//! Write resolved configuration to a directory tree.
//!
//! Every key becomes a file: leading segments are directories below the root
//! and the last segment names the file. Files hold the value's display text,
//! or the raw bytes for [`Value::Bytes`](crate::Value::Bytes).

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::trace;

use crate::key_path::{self, FlatMap, SEPARATOR};
use crate::{ConfigError, ConfigResult, ConfigResultExt, Lookup};

/// Write every resolved key of `source` below `root`.
///
/// Returns the written file paths in key order.
///
/// # Errors
///
/// Returns [`ConfigError::File`] when `root` is not an existing directory or
/// any write fails, and [`ConfigError::Construction`] when a key has a
/// segment that cannot name a file (empty, `.`, `..`, or containing a path
/// separator) or when one key is a strict prefix of another, since `a` cannot
/// be both a file and the directory holding `a.b`. Keys are checked before
/// anything is written.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use strata_config::dump::write_tree;
/// use strata_config::FlatStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let root = Utf8Path::from_path(dir.path()).ok_or("non-UTF-8 temp dir")?;
/// let mut store = FlatStore::default();
/// store.set("db.port", 5432);
/// let written = write_tree(root, &store)?;
/// assert_eq!(std::fs::read_to_string(&written[0])?, "5432");
/// # Ok(())
/// # }
/// ```
pub fn write_tree<L: Lookup + ?Sized>(root: &Utf8Path, source: &L) -> ConfigResult<Vec<Utf8PathBuf>> {
    let meta = fs::metadata(root).map_err(|e| ConfigError::file(root, e))?;
    if !meta.is_dir() {
        let err = io::Error::new(io::ErrorKind::NotADirectory, "dump root is not a directory");
        return Err(ConfigError::file(root, err).into());
    }
    let resolved = source.as_dict();
    let mut planned = Vec::with_capacity(resolved.len());
    for (key, value) in &resolved {
        check_not_prefix(&resolved, key)?;
        planned.push((key, file_path(root, key)?, value));
    }

    let mut written = Vec::new();
    for (key, path, value) in planned {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::file(parent, e))?;
        }
        fs::write(&path, value.to_bytes())
            .map_err(|e| ConfigError::file(&path, e))
            .into_config()?;
        trace!(key = %key, path = %path, "wrote configuration value");
        written.push(path);
    }
    Ok(written)
}

/// Reject `key` when another key lies below it.
fn check_not_prefix(resolved: &FlatMap, key: &str) -> ConfigResult<()> {
    let below = resolved
        .range(format!("{key}{SEPARATOR}")..)
        .next()
        .filter(|(other, _)| key_path::strip_section(other, key).is_some());
    match below {
        Some((other, _)) => Err(ConfigError::construction(format!(
            "key '{key}' is both a value and the parent of '{other}'"
        )))
        .into_config(),
        None => Ok(()),
    }
}

fn file_path(root: &Utf8Path, key: &str) -> ConfigResult<Utf8PathBuf> {
    let mut path = root.to_path_buf();
    for segment in key.split(SEPARATOR) {
        if matches!(segment, "" | "." | "..") || segment.contains(['/', '\\']) {
            return Err(ConfigError::construction(format!(
                "key '{key}' cannot be written as a file path"
            ))
            .into());
        }
        path.push(segment);
    }
    Ok(path)
}
