//! Probability corpus: binary records of recorded match transitions

pub mod loader;
pub mod transform;

use std::path::Path;

use crate::error::Result;
use crate::models::Instant;

pub use loader::{load_file, load_records, RawRecord, RECORD_SIZE};
pub use transform::{transform, transform_record};

/// Loads and transforms a corpus file in one go.
pub fn load_instants(path: &Path) -> Result<Vec<Instant>> {
    let records = load_file(path)?;
    transform(&records)
}
