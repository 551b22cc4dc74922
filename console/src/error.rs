use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
}
