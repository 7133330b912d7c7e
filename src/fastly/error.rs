//! Fastly API errors
//!
//! Operations return `anyhow::Result`. The local failures below are raised
//! before any network call (or, for [`NotAcknowledged`], after a negative
//! status response) and can be recovered with `downcast_ref`.

/// A required input field was empty or zero.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field \"service_id\"")]
    MissingService,
    #[error("missing required field \"version\"")]
    MissingVersion,
    #[error("missing required field \"name\"")]
    MissingName,
    #[error("missing required field \"new_name\"")]
    MissingNewName,
    #[error("missing required field \"project_id\"")]
    MissingProjectID,
    #[error("missing required field \"dataset\"")]
    MissingDataset,
    #[error("missing required field \"table\"")]
    MissingTable,
    #[error("missing required field \"user\"")]
    MissingUser,
    #[error("missing required field \"secret_key\"")]
    MissingSecretKey,
}

impl ValidationError {
    /// Wire name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingService => "service_id",
            ValidationError::MissingVersion => "version",
            ValidationError::MissingName => "name",
            ValidationError::MissingNewName => "new_name",
            ValidationError::MissingProjectID => "project_id",
            ValidationError::MissingDataset => "dataset",
            ValidationError::MissingTable => "table",
            ValidationError::MissingUser => "user",
            ValidationError::MissingSecretKey => "secret_key",
        }
    }
}

/// The server answered a delete without an affirmative status.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("request was not acknowledged (status: {status:?})")]
pub struct NotAcknowledged {
    pub status: String,
}

/// The API answered with a non-2xx status.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("API request failed: {status}")]
pub struct ApiStatusError {
    pub status: reqwest::StatusCode,
}

/// Fail with `err` when `value` is empty.
pub(crate) fn require(value: &str, err: ValidationError) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(err);
    }
    Ok(())
}

/// Fail with [`ValidationError::MissingVersion`] when `version` is zero.
pub(crate) fn require_version(version: u32) -> Result<(), ValidationError> {
    if version == 0 {
        return Err(ValidationError::MissingVersion);
    }
    Ok(())
}
