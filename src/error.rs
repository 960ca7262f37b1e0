use thiserror::Error;

use crate::dataset::RegionId;

#[derive(Error, Debug)]
pub enum DivideError {
    #[error("Can't merge ways of relation {region} into ring: {reason}")]
    RingAssembly { region: RegionId, reason: String },

    #[error("Bisection seed {0} is not a distinct region of the graph")]
    InvalidGraphSeed(RegionId),

    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DivideError>;
