pub mod calculations;
pub mod models;
pub mod reference;
pub mod sources;

pub use models::*;
pub use reference::ReferenceSnapshot;
pub use sources::{BracketSource, ConfigurationSource, IndustryCatalog, SourceError};
