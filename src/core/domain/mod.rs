//! Domain types.

mod record;
mod request;

pub use record::{Metadata, SealedRecord, SealedSpec, SealedValue, Template};
pub use request::{validate_key, validate_name, SealRequest};
