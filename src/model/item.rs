use serde::{Deserialize, Serialize};

/// Reference to another object in the target system by its codename.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CodenameRef {
    pub codename: String,
}

impl CodenameRef {
    pub fn new(codename: impl Into<String>) -> Self {
        CodenameRef {
            codename: codename.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MigrationItem {
    pub system: ItemSystem,
    pub elements: MovieElements,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ItemSystem {
    pub name: String,
    pub codename: String,
    pub collection: CodenameRef,
    pub language: CodenameRef,

    #[serde(rename = "type")]
    pub content_type: CodenameRef,

    pub workflow: CodenameRef,
    pub workflow_step: CodenameRef,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieElements {
    pub title: TextElement,
    pub length: NumberElement,
    pub category: MultipleChoiceElement,
    pub poster: AssetElement,
    pub plot: RichTextElement,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TextElement {
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NumberElement {
    pub value: f64,
}

/// Chosen options, in the order they appeared in the source. Repeats are kept.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MultipleChoiceElement {
    pub value: Vec<CodenameRef>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AssetElement {
    pub value: Vec<CodenameRef>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RichTextElement {
    pub value: RichTextValue,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RichTextValue {
    pub value: String,

    #[serde(default)]
    pub components: Vec<serde_json::Value>,
}

impl MigrationItem {
    pub fn category_codenames(&self) -> Vec<&str> {
        self.elements
            .category
            .value
            .iter()
            .map(|c| c.codename.as_str())
            .collect()
    }
}
