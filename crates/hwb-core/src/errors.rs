/// Core error type for the homework bot.
///
/// Adapter crates map their transport errors into this type so the poll loop
/// can handle every failure the same way (log, optionally report, keep going).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Credentials(Vec<&'static str>),

    #[error("config error: {0}")]
    Config(String),

    #[error("unexpected api answer: {0}")]
    ApiAnswer(String),

    #[error("wrong HTTP status {status} from {endpoint} (params: {params})")]
    ApiStatus {
        status: u16,
        endpoint: String,
        params: String,
    },

    #[error("invalid api response: {0}")]
    Shape(#[from] ShapeError),

    #[error("unknown homework status: {0:?}")]
    UnknownStatus(String),

    #[error("messaging error: {0}")]
    Messaging(String),
}

/// Structural problems with a decoded API payload.
///
/// Key presence is always checked before the value type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("payload is not a JSON object")]
    NotAMapping,

    #[error("missing key `{0}`")]
    MissingKey(&'static str),

    #[error("`{0}` is not a list")]
    NotASequence(&'static str),

    #[error("`{0}` has the wrong type")]
    WrongType(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
