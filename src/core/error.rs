use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtenderError {
    #[error("Upstream calculation failed: {0}")]
    UpstreamCalculation(String),

    #[error("Condition change rejected for record {record:?}: {reason}")]
    ConditionRejected {
        record: crate::core::types::RecordId,
        reason: String,
    },

    #[error("No weapon selected for the attack")]
    MissingWeapon,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtenderError>;
