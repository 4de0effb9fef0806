use thiserror::Error;

pub type BuilderResult<T> = Result<T, BuilderError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    #[error("Unknown building block type '{type_id}'")]
    UnknownType { type_id: String },

    #[error("Building block type '{type_id}' is already registered")]
    DuplicateType { type_id: String },

    #[error("No building block with instance id '{instance_id}'")]
    UnknownInstance { instance_id: String },

    #[error("Layout '{layout}' does not define zone '{zone}'")]
    UnknownZone { layout: String, zone: String },

    #[error("Page '{id}' not found")]
    PageNotFound { id: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BuilderError {
    pub(crate) fn persistence(message: impl Into<String>) -> Self {
        BuilderError::Persistence {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for BuilderError {
    fn from(err: serde_yaml::Error) -> Self {
        BuilderError::Config(err.to_string())
    }
}
