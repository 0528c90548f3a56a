use std::collections::BTreeMap;

use crate::error::{MigrateError, Result};

/// A closed lookup table for one controlled-vocabulary field.
///
/// Labels match exactly (case-sensitive). Unknown labels are an error,
/// never a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    name: String,
    table: BTreeMap<String, String>,
}

impl Vocabulary {
    pub fn new(name: impl Into<String>, table: BTreeMap<String, String>) -> Self {
        Vocabulary {
            name: name.into(),
            table,
        }
    }

    pub fn translate(&self, label: &str) -> Result<&str> {
        self.table
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| MigrateError::UnrecognizedVocabularyValue {
                vocabulary: self.name.clone(),
                value: label.to_string(),
            })
    }
}
