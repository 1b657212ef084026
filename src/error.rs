//! Crate-level error for hosts that propagate everything with `?`.

use crate::builder::BuildError;
use crate::runtime::{BindError, TriggerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Trigger(#[from] TriggerError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
