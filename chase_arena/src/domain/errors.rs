// Domain-level errors for entity construction and asset loading.

use crate::domain::entity::EntityKind;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum EntityError {
    /// The kind cannot serve as a prototype template.
    NotClonable(EntityKind),
    /// A player seat was presented to a manager that did not issue it.
    ForeignSeat,
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotClonable(kind) => write!(f, "{kind:?} entities cannot be cloned"),
            EntityError::ForeignSeat => write!(f, "player seat belongs to another manager"),
        }
    }
}

impl std::error::Error for EntityError {}

#[derive(Debug)]
pub enum AssetError {
    Open { path: PathBuf, reason: String },
    Decode { path: PathBuf, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Open { path, reason } => {
                write!(f, "failed to open asset {}: {reason}", path.display())
            }
            AssetError::Decode { path, reason } => {
                write!(f, "failed to decode asset {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {}
