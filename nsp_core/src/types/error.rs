//! # Value Model Errors

/// Errors raised while translating an external document into the value model.
///
/// These belong to the configuration-error taxonomy: they mean the document
/// is unusable, not that the subject is out of compliance.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// Mapping key that cannot be represented as a string
    #[error("Unsupported mapping key: {key}")]
    UnsupportedKey { key: String },

    /// Document node whose kind cannot be determined
    #[error("Unsupported document node: {reason}")]
    UnsupportedNode { reason: String },
}
