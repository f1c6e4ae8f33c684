// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors surfaced by the engine's ambient layers.
///
/// The gesture core itself has no fatal conditions: malformed samples
/// degrade to a no-op and geometry falls back to a placeholder state.
/// These variants cover configuration persistence and the bundled image
/// size probe.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// Probing an image's dimensions failed (unreadable or undecodable file).
    /// Reported per entry; the session converts it into the errored state.
    Probe(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Probe(e) => write!(f, "Probe Error: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Probe(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
