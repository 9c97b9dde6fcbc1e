use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("unknown specification type: {0}")]
    UnknownSpecificationType(String),

    #[error("could not initialize from specification \"{spec}\"")]
    InvalidSpecification {
        spec: String,
        #[source]
        source: serde_json::Error,
    },
}
