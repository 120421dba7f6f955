//! Shared HTTP plumbing for the REST layer

pub mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
