use std::{
    env::var_os,
    fs::File,
    io::{BufReader, Error, ErrorKind, Result},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::from_reader;

/// The workspace directory of the test data.
pub const DATA_DIR: &str = "data";

/// The workspace file which lists the test data.
const MANIFEST: &str = "assets_manifest.json";

/// Resolves the path to the requested data relative to the workspace directory.
pub fn resolve_path(path: &[impl AsRef<Path>]) -> Result<PathBuf> {
    let manifest_dir = var_os("CARGO_MANIFEST_DIR")
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "missing CARGO_MANIFEST_DIR"))?;
    let workspace = Path::new(&manifest_dir)
        .parent()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "missing cargo workspace dir"))?
        .to_path_buf();

    path.iter()
        .fold(workspace, |path, component| path.join(component))
        .canonicalize()
}

#[derive(Deserialize)]
struct Asset {
    id: String,
    url_suffix: String,
}

#[derive(Deserialize)]
struct Manifest {
    data_assets: Vec<Asset>,
}

/// Reads the asset list from the manifest.
fn read_manifest() -> Result<Manifest> {
    let file = File::open(resolve_path(&[MANIFEST])?)?;
    from_reader(BufReader::new(file))
        .map_err(|error| Error::new(ErrorKind::InvalidData, error.to_string()))
}

/// Resolves the path to the requested asset relative to the workspace directory.
///
/// The assets are listed by their ids in the `assets_manifest.json` of the workspace.
pub fn resolve_asset(id: &str) -> Result<PathBuf> {
    let asset = read_manifest()?
        .data_assets
        .into_iter()
        .find(|asset| asset.id == id)
        .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("missing asset '{}'", id)))?;
    resolve_path(&[DATA_DIR, asset.url_suffix.as_str()])
}
