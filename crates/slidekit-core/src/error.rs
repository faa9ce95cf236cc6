use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid value for '{attribute}': {value}")]
    Config { attribute: String, value: String },

    #[error("no panels available yet")]
    EmptyContent,

    #[error("index {index} outside of 0..{len}")]
    OutOfBounds { index: i64, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
