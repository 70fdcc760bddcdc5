//! Preference store error types.

/// Errors that can occur when persisting a preference.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    /// Reading or writing the backing file failed
    #[error("preferences I/O error: {message}")]
    Io { message: String },

    /// The stored preferences could not be (de)serialized
    #[error("preferences serialization error: {message}")]
    Serialization { message: String },
}
