//! Reference data for the tax calculators: band schedules from CSV, and the
//! industry catalog and company tax configuration from upstream JSON.

pub mod envelope;
pub mod schedule_loader;
pub mod stores;

pub use envelope::{decode_configuration, decode_industries};
pub use schedule_loader::{BandRecord, BandScheduleLoader, BandScheduleLoaderError};
pub use stores::{JsonFileCatalog, JsonFileConfiguration, StaticReferenceStore};
