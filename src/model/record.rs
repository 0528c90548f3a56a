use serde::{Deserialize, Serialize};

/// One row of the flat source export.
///
/// `genre` is comma-separated free text; `duration` is carried through
/// unchecked, so negative or fractional values survive mapping.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SourceRecord {
    pub title: String,
    pub language: String,
    pub genre: String,
    pub text: String,
    pub duration: f64,
}
