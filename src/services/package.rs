use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{MigrateError, Result};
use crate::model::asset::AssetDescriptor;
use crate::model::item::MigrationItem;
use crate::services::assets;

const ITEMS_FILE: &str = "items.json";
const ASSETS_FILE: &str = "assets.json";
const ASSETS_DIR: &str = "assets";

/// Everything handed to the packaging/import side for one run.
#[derive(Debug, Clone)]
pub struct MigrationPackage {
    pub assets: Vec<AssetDescriptor>,
    pub items: Vec<MigrationItem>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct StoreReport {
    pub location: String,
    pub items: usize,
    pub assets: usize,
}

pub trait PackageSink {
    fn store(&self, package: &MigrationPackage) -> Result<StoreReport>;
}

#[derive(Debug, Serialize)]
struct AssetManifestEntry<'a> {
    codename: &'a str,
    filename: &'a str,
    title: &'a str,
    archive_filename: &'a str,
    size: usize,
    sha256: String,
}

/// Writes a package as plain files under one directory:
/// `items.json`, `assets.json` and `assets/<archive_filename>`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySink { root: root.into() }
    }
}

impl PackageSink for DirectorySink {
    fn store(&self, package: &MigrationPackage) -> Result<StoreReport> {
        check_archive_names(&package.assets)?;

        fs::create_dir_all(self.root.join(ASSETS_DIR))?;

        let manifest: Vec<AssetManifestEntry> = package
            .assets
            .iter()
            .map(|a| AssetManifestEntry {
                codename: &a.codename,
                filename: &a.filename,
                title: &a.title,
                archive_filename: &a.archive_filename,
                size: a.binary_data.len(),
                sha256: assets::digest(&a.binary_data),
            })
            .collect();

        for a in &package.assets {
            write_atomic(
                &self.root.join(ASSETS_DIR).join(&a.archive_filename),
                &a.binary_data,
            )?;
        }

        let json = serde_json::to_string_pretty(&manifest)?;
        write_atomic(&self.root.join(ASSETS_FILE), json.as_bytes())?;

        let json = serde_json::to_string_pretty(&package.items)?;
        write_atomic(&self.root.join(ITEMS_FILE), json.as_bytes())?;

        info!(
            root = %self.root.display(),
            items = package.items.len(),
            assets = package.assets.len(),
            "package stored"
        );

        Ok(StoreReport {
            location: self.root.to_string_lossy().to_string(),
            items: package.items.len(),
            assets: package.assets.len(),
        })
    }
}

/// Archive names must be bare, distinct file names so every payload lands
/// directly under `assets/`.
fn check_archive_names(assets: &[AssetDescriptor]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for a in assets {
        let name = a.archive_filename.as_str();
        let bare = Path::new(name).file_name().and_then(|s| s.to_str()) == Some(name)
            && !name.contains(['/', '\\']);

        if !bare {
            return Err(MigrateError::InvalidPackage(format!(
                "asset '{}' has archive filename '{}' which is not a plain file name",
                a.codename, name
            )));
        }

        if !seen.insert(name) {
            return Err(MigrateError::InvalidPackage(format!(
                "archive filename '{}' is used by more than one asset",
                name
            )));
        }
    }

    Ok(())
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&tmp, bytes)?;

    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp, path)?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "package".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
