use std::str::Utf8Error;

#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Wrong number of inputs given, or too many outputs requested
    ArgumentCount(String),
    /// An input does not have the expected element type
    InvalidType {
        /// name of the offending input
        name: &'static str,
        /// what this input should be
        expected: &'static str,
    },
    /// An input does not have the expected dimensions
    InvalidShape {
        /// name of the offending input
        name: &'static str,
        /// the shape this input should have
        expected: String,
        /// the shape that was given
        got: String,
    },
    /// An input contains a value outside of the supported set
    InvalidValue {
        /// name of the offending input
        name: &'static str,
        message: String,
    },
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// Error due to C strings containing non-utf8 data
    Utf8(Utf8Error),
    /// The external force evaluator reported a failure
    Evaluator(String),
    /// Error used when a panic was caught
    Panic(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ArgumentCount(e) => write!(f, "wrong number of arguments: {}", e),
            Error::InvalidType { name, expected } => {
                write!(f, "invalid type for {}: expected {}", name, expected)
            },
            Error::InvalidShape { name, expected, got } => {
                write!(f, "invalid shape for {}: expected {}, got {}", name, expected, got)
            },
            Error::InvalidValue { name, message } => write!(f, "invalid value in {}: {}", name, message),
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Utf8(e) => write!(f, "utf8 decoding error: {}", e),
            Error::Evaluator(e) => write!(f, "force evaluator error: {}", e),
            Error::Panic(e) => write!(f, "internal error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ArgumentCount(_) |
            Error::InvalidType { .. } |
            Error::InvalidShape { .. } |
            Error::InvalidValue { .. } |
            Error::InvalidParameter(_) |
            Error::Evaluator(_) |
            Error::Panic(_) => None,
            Error::Json(e) => Some(e),
            Error::Utf8(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl From<Utf8Error> for Error {
    fn from(error: Utf8Error) -> Error {
        Error::Utf8(error)
    }
}

// Box<dyn Any + Send + 'static> is the error type in std::panic::catch_unwind
impl From<Box<dyn std::any::Any + Send + 'static>> for Error {
    fn from(error: Box<dyn std::any::Any + Send + 'static>) -> Error {
        let message = if let Some(message) = error.downcast_ref::<String>() {
            message.clone()
        } else if let Some(message) = error.downcast_ref::<&str>() {
            (*message).to_owned()
        } else {
            "panic message is not a string".to_owned()
        };

        Error::Panic(message)
    }
}
