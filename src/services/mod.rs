pub mod assets;
pub mod batch;
pub mod codename;
pub mod config;
pub mod mapper;
pub mod package;
pub mod qa;
pub mod rich_text;
pub mod source;
pub mod vocabulary;
