use std::fmt;

use crate::encoded::SlotError;
use crate::impl_err;
use crate::profile::ConfigError;

/// Errors surfaced by the crate.
///
/// Resolution itself never fails; only profile construction and
/// collaborator contract violations (a slot refusing a value) do.
#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Slot(SlotError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "profile configuration: {err}"),
            Error::Slot(err) => write!(f, "encoded slot: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Slot(err) => Some(err),
        }
    }
}

impl_err!(ConfigError, Config);
impl_err!(SlotError, Slot);
