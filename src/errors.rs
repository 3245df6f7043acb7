use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced while turning a template into a JSON document.
///
/// The transform is pure and deterministic, so none of these are transient;
/// callers re-invoke only after fixing the input graph.
#[derive(Debug, Error)]
pub enum Error {
    /// A resource's declared identity cannot produce a valid
    /// `AWS::<Service>::<Shape>` type string.
    #[error("malformed resource type for \"{name}\": {reason}")]
    MalformedResourceType { name: String, reason: String },

    /// A value in the property graph cannot be represented in the output
    /// document. `path` is the dotted field path to the offending value.
    #[error("cannot serialize value at {path}: {reason}")]
    UnsupportedValue { path: String, reason: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
