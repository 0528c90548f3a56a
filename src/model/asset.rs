use serde::{Deserialize, Serialize};

/// Static description of an asset, before its bytes are read.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub codename: String,
    pub filename: String,
    pub title: String,

    /// Name inside the stored package; falls back to `filename`.
    #[serde(default)]
    pub archive_filename: Option<String>,
}

impl AssetSpec {
    pub fn archive_name(&self) -> &str {
        self.archive_filename
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.filename)
    }
}

/// An asset with its payload. Built once per run and never modified.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub codename: String,
    pub filename: String,
    pub title: String,
    pub archive_filename: String,

    #[serde(skip)]
    pub binary_data: Vec<u8>,
}

impl AssetDescriptor {
    pub fn from_bytes(spec: &AssetSpec, binary_data: Vec<u8>) -> Self {
        AssetDescriptor {
            codename: spec.codename.clone(),
            filename: spec.filename.clone(),
            title: spec.title.clone(),
            archive_filename: spec.archive_name().to_string(),
            binary_data,
        }
    }
}
