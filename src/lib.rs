//! Maps flat movie export records into structured migration items for
//! bulk import, and packages the referenced assets alongside them.

pub mod error;
pub mod model;
pub mod protocol;
pub mod services;

pub use error::{MigrateError, Result};
pub use model::config::{ErrorPolicy, MigrationConfig};
pub use model::item::MigrationItem;
pub use model::record::SourceRecord;
pub use services::mapper::Mapper;
