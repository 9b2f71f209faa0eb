use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("env key {key} emitted by both {first} and {second}")]
    KeyCollision {
        key: String,
        first: &'static str,
        second: &'static str,
    },
}
