//! Error type of the crate.
//!
//! The engine itself cannot fail once constructed; the only error is a configuration that is
//! rejected at construction time.

use std::fmt;

/// Errors that can occur when constructing a [`Simulation`](crate::simulation::Simulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A configuration parameter or an explicit initial particle is unusable.
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl Error {
    #[inline]
    pub(crate) const fn invalid(parameter: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfiguration { parameter, reason }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration { parameter, reason } => {
                write!(f, "invalid configuration: `{}` {}", parameter, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
