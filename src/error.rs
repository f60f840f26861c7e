use thiserror::Error;

pub type Result<T> = std::result::Result<T, RustMtxError>;

#[derive(Error, Debug)]
pub enum RustMtxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed status report: {0}")]
    MalformedReport(String),

    #[error("no {kind} found for id {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("attempting to load volume {volume} into non-empty drive {drive}")]
    DriveNotAvailable { drive: String, volume: String },

    #[error("volume {volume} is already in drive {drive}")]
    VolumeAlreadyInDrive { volume: String, drive: String },

    #[error("attempting to unload volume {volume} not currently in a drive")]
    VolumeNotInDrive { volume: String },

    #[error("no home slot found for volume {volume}")]
    NoHomeSlot { volume: String },

    #[error("no cleaning media available")]
    NoCleaningMediaAvailable,

    #[error("slot {slot} is occupied, cannot place volume {volume}")]
    SlotNotAvailable { slot: String, volume: String },

    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("{command}: {diagnostic}")]
    ExternalCommandFailed { command: String, diagnostic: String },

    #[error("inconsistent inventory: {0}")]
    InconsistentInventory(String),

    #[error("{operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<RustMtxError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parameter validation error: {0}")]
    ParameterValidation(String),

    #[error("System error: {0}")]
    System(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RustMtxError {
    pub fn malformed_report<T: Into<String>>(msg: T) -> Self {
        Self::MalformedReport(msg.into())
    }

    pub fn not_found<T: Into<String>>(kind: &'static str, id: T) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn inconsistent<T: Into<String>>(msg: T) -> Self {
        Self::InconsistentInventory(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    pub fn parameter_validation<T: Into<String>>(msg: T) -> Self {
        Self::ParameterValidation(msg.into())
    }

    pub fn system<T: Into<String>>(msg: T) -> Self {
        Self::System(msg.into())
    }

    /// Attach the name of the failing handle operation.
    pub fn in_operation(self, operation: &'static str) -> Self {
        Self::Operation {
            operation,
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping any operation context.
    pub fn root_cause(&self) -> &RustMtxError {
        match self {
            Self::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
