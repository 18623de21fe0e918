//! Read a directory tree into a map for assertions.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use camino::Utf8Path;

/// Collect every regular file below `root`.
///
/// Keys are paths relative to `root` joined with `/`; values are raw file
/// contents.
///
/// # Errors
///
/// Returns an error when a directory cannot be listed, a file cannot be
/// read, or a path is not valid UTF-8.
pub fn read_tree(root: &Utf8Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in dir
            .read_dir_utf8()
            .with_context(|| format!("list directory {dir}"))?
        {
            let entry = entry.with_context(|| format!("read entry in {dir}"))?;
            let path = entry.path().to_path_buf();
            if entry.file_type()?.is_dir() {
                pending.push(path);
                continue;
            }
            let bytes = std::fs::read(&path).with_context(|| format!("read {path}"))?;
            files.insert(relative(root, &path)?, bytes);
        }
    }
    Ok(files)
}

fn relative(root: &Utf8Path, path: &Utf8Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .with_context(|| format!("{path} is not below {root}"))?;
    Ok(rel
        .components()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("/"))
}
