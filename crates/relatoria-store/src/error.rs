use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to {table} failed: {message}")]
    Transport { table: &'static str, message: String },

    #[error("{table} rejected the request ({status}): {message}")]
    Rejected {
        table: &'static str,
        status: u16,
        message: String,
    },

    #[error("unexpected response from {table}: {message}")]
    Decode { table: &'static str, message: String },

    #[error("injected fault: {0}")]
    Injected(&'static str),
}
