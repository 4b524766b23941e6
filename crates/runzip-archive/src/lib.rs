//! Safe, atomic archive extraction.
//!
//! Entries are extracted into a private staging directory next to the
//! final destination (`<dest>.tmp`), with every archive-supplied path
//! validated against the staging root before anything touches the
//! filesystem. Once the whole archive has been read, a finalize step
//! moves the staged content into place with a single rename, unwrapping
//! a lone top-level entry so the user never ends up with a redundant
//! nesting level.
//!
//! # Architecture
//!
//! - `sanitize` - path validation (zip-slip prevention)
//! - `format` - container detection and tar codecs
//! - `extract` - streaming entry extraction into the staging root
//! - `finalize` - staging-to-destination rename policy
//! - `stage` - destination planning and staging-root naming

pub use error::{Error, Result};
pub use extract::extract;
pub use finalize::finalize;
pub use format::{ArchiveFormat, Codec, detect_format};
pub use sanitize::sanitize_entry_path;
pub use stage::ExtractPlan;

mod error;
mod extract;
mod finalize;
pub mod format;
mod sanitize;
mod stage;
