use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{MigrateError, Result};
use crate::model::asset::{AssetDescriptor, AssetSpec};

/// Read every listed asset from `base_dir`.
pub fn load(specs: &[AssetSpec], base_dir: &Path) -> Result<Vec<AssetDescriptor>> {
    let mut assets = Vec::with_capacity(specs.len());

    for spec in specs {
        let path = base_dir.join(&spec.filename);
        let bytes = fs::read(&path).map_err(|source| MigrateError::AssetRead {
            codename: spec.codename.clone(),
            path: path.clone(),
            source,
        })?;

        debug!(codename = %spec.codename, bytes = bytes.len(), "asset loaded");
        assets.push(AssetDescriptor::from_bytes(spec, bytes));
    }

    Ok(assets)
}

pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(codename: &str, filename: &str) -> AssetSpec {
        AssetSpec {
            codename: codename.to_string(),
            filename: filename.to_string(),
            title: "Teaser".to_string(),
            archive_filename: None,
        }
    }

    #[test]
    fn loads_bytes_and_defaults_archive_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("teaser.jpg"), b"\xff\xd8jpeg").unwrap();

        let assets = load(&[spec("teaser", "teaser.jpg")], dir.path()).unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].codename, "teaser");
        assert_eq!(assets[0].archive_filename, "teaser.jpg");
        assert_eq!(assets[0].binary_data, b"\xff\xd8jpeg");
    }

    #[test]
    fn missing_file_names_the_asset() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&[spec("ghost", "ghost.png")], dir.path()).unwrap_err();
        match err {
            MigrateError::AssetRead { codename, path, .. } => {
                assert_eq!(codename, "ghost");
                assert!(path.ends_with("ghost.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn digest_is_sha256_hex() {
        assert_eq!(
            digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
