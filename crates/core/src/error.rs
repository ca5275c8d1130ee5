/// Result alias that carries the custom [`ParamsError`] type.
pub type Result<T> = std::result::Result<T, ParamsError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// The aspect ratio token is not of the form `<int>:<int>` with both
    /// components positive.
    #[error("invalid aspect ratio `{token}`, expected `W:H` with positive integers")]
    InvalidRatioFormat { token: String },
    /// A categorical input received a value outside its option list.
    #[error("invalid value `{value}` for `{field}`")]
    InvalidChoice { field: String, value: String },
    /// A numeric input fell outside the range its widget declares.
    #[error("input `{field}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },
    #[error("missing input `{0}`")]
    MissingInput(String),
    /// An input was bound to a value of the wrong kind.
    #[error("input `{field}` expects {expected}")]
    InputType {
        field: String,
        expected: &'static str,
    },
    #[error("no node registered under `{0}`")]
    UnknownNode(String),
    #[error("a node named `{0}` is already registered")]
    DuplicateNode(String),
    /// Configuration could not be decoded.
    #[error("{0}")]
    Config(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

impl ParamsError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn input_type(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InputType {
            field: field.into(),
            expected,
        }
    }

    pub(crate) fn out_of_range(
        field: impl Into<String>,
        value: impl Into<String>,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value: value.into(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}
