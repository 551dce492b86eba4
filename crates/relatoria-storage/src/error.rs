use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed for {locator}: {message}")]
    Transport { locator: String, message: String },

    #[error("storage rejected removal of {locator} ({status}): {message}")]
    Remove {
        locator: String,
        status: u16,
        message: String,
    },

    #[error("injected fault: {0}")]
    Injected(String),
}
