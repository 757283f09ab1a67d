pub mod role;
pub mod app_config;

pub use role::UserRole;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Invalid pricing policy: {0}")]
    InvalidPolicy(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
