use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::asset::AssetSpec;

fn default_collection() -> String {
    "default".to_string()
}

fn default_content_type() -> String {
    "movie".to_string()
}

fn default_workflow() -> String {
    "default".to_string()
}

fn default_workflow_step() -> String {
    "draft".to_string()
}

fn default_languages() -> BTreeMap<String, String> {
    BTreeMap::from([("english".to_string(), "en".to_string())])
}

fn default_poster_asset() -> String {
    "warrior_teaser".to_string()
}

fn default_assets() -> Vec<AssetSpec> {
    vec![AssetSpec {
        codename: "warrior_teaser".to_string(),
        filename: "warrior_teaser.jpg".to_string(),
        title: "Warrior teaser".to_string(),
        archive_filename: Some("warrior_teaser.jpg".to_string()),
    }]
}

/// What a batch does when a record fails to map.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first failing record.
    #[default]
    FailFast,
    /// Map every record, then report all failures together.
    CollectAll,
}

/// Everything the mapper treats as constant for one migration run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MigrationConfig {
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_content_type", alias = "type")]
    pub content_type: String,

    #[serde(default = "default_workflow")]
    pub workflow: String,

    #[serde(default = "default_workflow_step")]
    pub workflow_step: String,

    /// Language label -> language codename. Matched case-sensitively.
    #[serde(default = "default_languages")]
    pub languages: BTreeMap<String, String>,

    #[serde(default = "default_poster_asset")]
    pub poster_asset: String,

    #[serde(default = "default_assets")]
    pub assets: Vec<AssetSpec>,

    #[serde(default)]
    pub escape_html: bool,

    #[serde(default)]
    pub error_policy: ErrorPolicy,

    #[serde(default)]
    pub parallel: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        MigrationConfig {
            collection: default_collection(),
            content_type: default_content_type(),
            workflow: default_workflow(),
            workflow_step: default_workflow_step(),
            languages: default_languages(),
            poster_asset: default_poster_asset(),
            assets: default_assets(),
            escape_html: false,
            error_policy: ErrorPolicy::FailFast,
            parallel: false,
        }
    }
}
