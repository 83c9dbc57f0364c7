use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("login '{0}' is already taken")]
    DuplicateLogin(String),

    #[error("user id {0} does not exist")]
    NotFound(u32),

    #[error("unknown or read-only field '{0}'")]
    UnknownField(String),

    #[error("malformed user file: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
