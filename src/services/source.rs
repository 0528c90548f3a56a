use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{MigrateError, Result};
use crate::model::record::SourceRecord;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Serialize)]
pub struct EncodingCandidate {
    pub name: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct EncodingDetectionResult {
    pub best: String,
    pub confidence: f32,
    pub candidates: Vec<EncodingCandidate>,
}

pub fn detect_from_file(path: &Path) -> Result<EncodingDetectionResult> {
    let bytes = fs::read(path)?;
    Ok(detect_encoding(&bytes))
}

pub fn detect_encoding(bytes: &[u8]) -> EncodingDetectionResult {
    if bytes.starts_with(&UTF8_BOM) {
        return EncodingDetectionResult {
            best: "utf-8-sig".into(),
            confidence: 0.99,
            candidates: vec![
                EncodingCandidate {
                    name: "utf-8-sig".into(),
                    confidence: 0.99,
                },
                EncodingCandidate {
                    name: "utf-8".into(),
                    confidence: 0.90,
                },
            ],
        };
    }

    let encoding = guess(bytes);
    let best = encoding.name().to_lowercase();
    let confidence = estimate_confidence(bytes, encoding);

    let mut candidates = vec![EncodingCandidate {
        name: best.clone(),
        confidence,
    }];

    // Exports saved from spreadsheet tools are often cp1252 mislabeled as latin-1.
    if best == "windows-1252" {
        candidates.push(EncodingCandidate {
            name: "iso-8859-1".into(),
            confidence: (confidence - 0.05).max(0.0),
        });
    }

    if best == "utf-8" {
        candidates.push(EncodingCandidate {
            name: "utf-8-sig".into(),
            confidence: (confidence - 0.20).max(0.0),
        });
    }

    EncodingDetectionResult {
        best,
        confidence,
        candidates,
    }
}

fn guess(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn estimate_confidence(bytes: &[u8], encoding: &'static Encoding) -> f32 {
    let (text, _, had_errors) = encoding.decode(bytes);

    if had_errors {
        return 0.35;
    }

    let len = text.len();
    if len < 64 {
        0.55
    } else if len < 512 {
        0.70
    } else if len < 4096 {
        0.82
    } else {
        0.90
    }
}

/// Decode a source file to text. A UTF-8 BOM is honored and dropped.
pub fn decode(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return UTF_8.decode_without_bom_handling(rest).0.into_owned();
    }

    let encoding = guess(bytes);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Parse a JSON array of source records.
pub fn parse_records(text: &str) -> Result<Vec<SourceRecord>> {
    let value: Value = serde_json::from_str(text)?;
    records_from_value(&value)
}

pub fn records_from_value(value: &Value) -> Result<Vec<SourceRecord>> {
    let arr = value.as_array().ok_or_else(|| MigrateError::InvalidRecord {
        index: 0,
        message: "expected a JSON array of records".to_string(),
    })?;

    let mut records: Vec<SourceRecord> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<SourceRecord>(v) {
            Ok(r) => records.push(r),
            Err(e) => {
                return Err(MigrateError::InvalidRecord {
                    index: i,
                    message: e.to_string(),
                })
            }
        }
    }

    Ok(records)
}

pub fn read_records(path: &Path) -> Result<Vec<SourceRecord>> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read source file");

    let records = parse_records(&decode(&bytes))?;
    info!(path = %path.display(), records = records.len(), "source records loaded");
    Ok(records)
}
