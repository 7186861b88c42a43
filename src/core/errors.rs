use thiserror::Error as ThisError;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors raised while loading, querying, or rendering the IP ranges.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The IP ranges document could not be retrieved from the URL or the cache.
    #[error("{0}")]
    DataUnavailable(String),

    /// The IP ranges document (or one of its prefixes) could not be decoded.
    #[error("{0}")]
    MalformedData(String),

    /// A user-supplied value could not be parsed.
    #[error("{0}")]
    InvalidInput(String),

    /// A result could not be serialized.
    #[error("{0}")]
    RenderFailure(String),
}

/// Discriminant of an [Error], without the message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    DataUnavailable,
    MalformedData,
    InvalidInput,
    RenderFailure,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DataUnavailable(_) => ErrorKind::DataUnavailable,
            Error::MalformedData(_) => ErrorKind::MalformedData,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::RenderFailure(_) => ErrorKind::RenderFailure,
        }
    }
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
