#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    NormalizeCodename,
    DefaultConfig,
    MapRecords,
    CheckRecords,
    DetectEncoding,
    StorePackage,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "codename.normalize" => Command::NormalizeCodename,
            "config.default" => Command::DefaultConfig,
            "records.map" => Command::MapRecords,
            "records.check" => Command::CheckRecords,
            "encoding.detect" => Command::DetectEncoding,
            "package.store" => Command::StorePackage,
            _ => Command::Unknown,
        }
    }
}
