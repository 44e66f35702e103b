pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Operation outcomes are never collapsed into `false`/empty sentinels; the
/// API layer maps each variant to a distinct status code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<minutes_providers::Error> for Error {
	fn from(err: minutes_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<minutes_storage::Error> for Error {
	fn from(err: minutes_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
