//! Writing a resolved view to disk and reading it back.

use anyhow::{Context, Result};
use camino::Utf8Path;
use rstest::rstest;
use strata_config::dump::write_tree;
use strata_config::{FlatStore, Lookup, Value, layered};

#[rstest]
fn resolved_view_round_trips_through_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = Utf8Path::from_path(dir.path()).context("temp dir is not UTF-8")?;

    let mut base = FlatStore::default();
    base.set("server.host", "0.0.0.0");
    base.set("server.port", 80);
    base.set("tls.enabled", false);
    let mut site = FlatStore::default();
    site.set("server.port", 8443);
    site.set("tls.enabled", true);
    let view = layered([site, base])?;

    let written = write_tree(root, &view)?;
    assert_eq!(written.len(), 3);

    let files = test_helpers::tree::read_tree(root)?;
    let reread: FlatStore = FlatStore::from_flat(
        files
            .into_iter()
            .map(|(path, bytes)| -> Result<(String, Value)> {
                Ok((path.replace('/', "."), String::from_utf8(bytes)?.into()))
            })
            .collect::<Result<_>>()?,
        false,
    );
    assert_eq!(reread.get_int("server.port")?, 8443);
    assert!(reread.get_bool("tls.enabled")?);
    assert_eq!(reread.get_str("server.host", "{}")?, "0.0.0.0");
    Ok(())
}
