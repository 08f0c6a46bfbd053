use optparse::{ParseError, RegistryError};

use crate::arguments::Command;

#[derive(Debug, thiserror::Error)]
pub enum BojtierError {
    #[error("No specific command")]
    NoCommand,

    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),

    #[error("{source}")]
    Register {
        command: Command,
        #[source]
        source: RegistryError,
    },

    #[error("{source}")]
    Parse {
        command: Command,
        #[source]
        source: ParseError,
    },

    /// The arguments parsed but do not make a valid invocation.
    #[error("{message}")]
    Usage { command: Command, message: String },
}

impl BojtierError {
    /// Command whose help accompanies the error, if any.
    pub fn command(&self) -> Option<Command> {
        match self {
            BojtierError::NoCommand | BojtierError::UnknownCommand(_) => None,
            BojtierError::Register { command, .. }
            | BojtierError::Parse { command, .. }
            | BojtierError::Usage { command, .. } => Some(*command),
        }
    }
}

pub type Result<T> = std::result::Result<T, BojtierError>;
