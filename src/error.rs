//! Error types for talking to the program directory

/// A single HTTP round trip failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {code} from {url}")]
    Status { url: String, code: u16 },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// A GraphQL response did not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum GraphqlError {
    #[error("GraphQL request for '{handle}' failed: {source}")]
    Fetch {
        handle: String,
        #[source]
        source: FetchError,
    },

    #[error("GraphQL errors for '{handle}': {messages}")]
    Server { handle: String, messages: String },

    #[error("GraphQL response for '{handle}' is missing {field}")]
    MissingField { handle: String, field: &'static str },

    #[error("GraphQL response for '{handle}' is malformed: {source}")]
    Malformed {
        handle: String,
        #[source]
        source: serde_json::Error,
    },
}
