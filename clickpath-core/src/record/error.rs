use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line does not match the access log grammar")]
    NoMatch,

    #[error("invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid status code '{value}'")]
    Status { value: String },

    #[error("invalid response size '{value}'")]
    Size { value: String },
}
