pub mod asset;
pub mod config;
pub mod item;
pub mod record;
