use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session error: {0}")]
    Session(#[from] store::StoreError),
    #[error("{0}")]
    Client(#[from] client::ClientError),
    #[error("invalid input: {0}")]
    Form(#[from] api_types::forms::FormError),
    #[error("report error: {0}")]
    Report(#[from] reports::ReportError),
    #[error("{0}")]
    Command(String),
}
