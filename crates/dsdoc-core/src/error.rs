//! Crate-level error type

use thiserror::Error;

use crate::parser::ParseError;
use crate::registry::{IdentityError, LinkError};

/// Any error raised while turning batches into a document tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The batch is malformed; nothing was registered for it
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// The record parsed but its identity key is already taken
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The tree could not be linked
    #[error(transparent)]
    Link(#[from] LinkError),
}

impl Error {
    /// Name of the source the offending record came from
    #[must_use]
    pub fn origin(&self) -> &str {
        match self {
            Error::Syntax(err) => err.origin.as_str(),
            Error::Identity(err) => err.origin.as_str(),
            Error::Link(LinkError::ParentNotFound { origin, .. } | LinkError::Cycle { origin, .. }) => {
                origin.as_str()
            }
        }
    }
}
