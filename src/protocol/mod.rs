use std::path::PathBuf;

use serde_json::{json, Value};
use tracing::debug;

use crate::error::{MigrateError, Result};
use crate::model::asset::AssetDescriptor;
use crate::model::config::MigrationConfig;
use crate::model::record::SourceRecord;
use crate::services::package::{DirectorySink, MigrationPackage, PackageSink, StoreReport};
use crate::services::{assets, batch, codename, config, mapper::Mapper, qa, source};

mod command;
pub use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn get_str<'a>(payload: &'a Value, key: &str) -> &'a str {
    payload.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn respond(id: Value, result: Result<Value>) -> String {
    match result {
        Ok(payload) => ok(id, payload),
        Err(e) => err(id, e.to_string()),
    }
}

fn config_from_payload(payload: &Value) -> Result<MigrationConfig> {
    match payload.get("config") {
        None | Some(Value::Null) => Ok(MigrationConfig::default()),
        Some(v) => Ok(serde_json::from_value(v.clone())?),
    }
}

fn records_from_payload(payload: &Value) -> Result<Vec<SourceRecord>> {
    match payload.get("records") {
        Some(records) if records.is_array() => source::records_from_value(records),
        _ => Err(MigrateError::InvalidRequest(
            "payload.records must be an array".to_string(),
        )),
    }
}

fn map_records(payload: &Value) -> Result<Value> {
    let mapper = Mapper::new(config_from_payload(payload)?);
    let records = records_from_payload(payload)?;
    let outcome = batch::run(&records, &mapper)?;
    Ok(json!({ "items": outcome.items, "report": outcome.report }))
}

fn check_records(payload: &Value) -> Result<Value> {
    let mapper = Mapper::new(config_from_payload(payload)?);
    let records = records_from_payload(payload)?;
    let outcome = batch::run(&records, &mapper)?;

    // Payload bytes are irrelevant to the checks.
    let declared: Vec<_> = mapper
        .config()
        .assets
        .iter()
        .map(|spec| AssetDescriptor::from_bytes(spec, Vec::new()))
        .collect();

    let issues = qa::run(&outcome.items, &declared);
    Ok(json!({ "issues": issues }))
}

fn store_package(payload: &Value) -> Result<StoreReport> {
    let source_path = get_str(payload, "source_path");
    let output_dir = get_str(payload, "output_dir");
    let asset_dir = get_str(payload, "asset_dir");
    let config_path = get_str(payload, "config_path");

    if source_path.is_empty() || output_dir.is_empty() {
        return Err(MigrateError::InvalidRequest(
            "payload.source_path and payload.output_dir are required".to_string(),
        ));
    }

    let cfg = if config_path.is_empty() {
        MigrationConfig::default()
    } else {
        config::load(&PathBuf::from(config_path))?
    };

    let source_path = PathBuf::from(source_path);
    let asset_dir = if asset_dir.is_empty() {
        source_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        PathBuf::from(asset_dir)
    };

    let records = source::read_records(&source_path)?;
    let assets = assets::load(&cfg.assets, &asset_dir)?;

    let mapper = Mapper::new(cfg);
    let outcome = batch::run(&records, &mapper)?;

    let package = MigrationPackage {
        assets,
        items: outcome.items,
    };

    DirectorySink::new(output_dir).store(&package)
}

pub fn handle(input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd = Command::from(get_cmd(&req));
    let payload = get_payload(&req);

    debug!(?cmd, "request");

    match cmd {
        Command::Ping => ok(id, json!({ "message": "migrate-core alive" })),

        Command::NormalizeCodename => {
            let text = get_str(payload, "text");
            ok(id, json!({ "codename": codename::to_codename(text) }))
        }

        Command::DefaultConfig => respond(
            id,
            serde_json::to_value(MigrationConfig::default()).map_err(MigrateError::from),
        ),

        Command::MapRecords => respond(id, map_records(payload)),

        Command::CheckRecords => respond(id, check_records(payload)),

        Command::DetectEncoding => {
            let path = get_str(payload, "path");
            if path.is_empty() {
                return err(id, "payload.path is required");
            }
            let result = source::detect_from_file(&PathBuf::from(path))
                .and_then(|r| serde_json::to_value(r).map_err(MigrateError::from));
            respond(id, result)
        }

        Command::StorePackage => {
            let result = store_package(payload)
                .and_then(|r| serde_json::to_value(r).map_err(MigrateError::from));
            respond(id, result)
        }

        Command::Unknown => err(id, "unknown command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(resp: &str) -> Value {
        serde_json::from_str(resp).unwrap()
    }

    #[test]
    fn ping() {
        let resp = parse(&handle(r#"{"id":1,"cmd":"ping"}"#));
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["status"], "ok");
    }

    #[test]
    fn invalid_json_and_unknown_command() {
        assert_eq!(parse(&handle("{nope"))["message"], "invalid json");
        let resp = parse(&handle(r#"{"id":"x","cmd":"frobnicate"}"#));
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "unknown command");
    }

    #[test]
    fn normalize_codename() {
        let resp = parse(&handle(
            r#"{"id":2,"cmd":"codename.normalize","payload":{"text":"Amélie!"}}"#,
        ));
        assert_eq!(resp["payload"]["codename"], "amlie");
    }

    #[test]
    fn map_records_returns_items_in_import_shape() {
        let resp = parse(&handle(
            r#"{"id":3,"cmd":"records.map","payload":{"records":[
                {"title":"Warrior","language":"english","genre":"Drama, Sport","text":"A fighter's tale.","duration":140}
            ]}}"#,
        ));
        assert_eq!(resp["status"], "ok", "{resp}");

        let item = &resp["payload"]["items"][0];
        assert_eq!(item["system"]["codename"], "warrior");
        assert_eq!(item["system"]["type"]["codename"], "movie");
        assert_eq!(item["system"]["language"]["codename"], "en");
        assert_eq!(item["elements"]["category"]["value"][1]["codename"], "Sport");
        assert_eq!(item["elements"]["poster"]["value"][0]["codename"], "warrior_teaser");
        assert_eq!(
            item["elements"]["plot"]["value"]["value"],
            "<h1>Warrior</h1><p>A fighter's tale.</p>"
        );
        assert_eq!(resp["payload"]["report"]["mapped"], 1);
    }

    #[test]
    fn map_records_error_names_title_and_value() {
        let resp = parse(&handle(
            r#"{"id":4,"cmd":"records.map","payload":{"records":[
                {"title":"Amélie","language":"french","genre":"Comedy","text":"","duration":122}
            ]}}"#,
        ));
        assert_eq!(resp["status"], "error");
        let message = resp["message"].as_str().unwrap();
        assert!(message.contains("Amélie"), "{message}");
        assert!(message.contains("french"), "{message}");
    }

    #[test]
    fn missing_payload_fields_are_request_errors() {
        let resp = parse(&handle(r#"{"id":6,"cmd":"records.map","payload":{}}"#));
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "invalid request: payload.records must be an array");

        let resp = parse(&handle(
            r#"{"id":7,"cmd":"records.map","payload":{"records":{"title":"x"}}}"#,
        ));
        assert_eq!(resp["message"], "invalid request: payload.records must be an array");

        let resp = parse(&handle(
            r#"{"id":8,"cmd":"package.store","payload":{"source_path":"data.json"}}"#,
        ));
        assert_eq!(
            resp["message"],
            "invalid request: payload.source_path and payload.output_dir are required"
        );
    }

    #[test]
    fn check_records_reports_issues() {
        let resp = parse(&handle(
            r#"{"id":5,"cmd":"records.check","payload":{"records":[
                {"title":"Heat","language":"english","genre":"Crime,","text":"","duration":170}
            ]}}"#,
        ));
        assert_eq!(resp["payload"]["issues"][0]["code"], "EMPTY_CATEGORY");
    }
}
