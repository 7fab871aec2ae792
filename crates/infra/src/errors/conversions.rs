//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use rsblox_domain::BloxError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BloxError);

impl From<InfraError> for BloxError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BloxError> for InfraError {
    fn from(value: BloxError) -> Self {
        InfraError(value)
    }
}

trait IntoBloxError {
    fn into_blox(self) -> BloxError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BloxError */
/* -------------------------------------------------------------------------- */

// Only client construction surfaces a reqwest error here; failed calls become
// a `CallFailure` inside the executor instead.
impl IntoBloxError for HttpError {
    fn into_blox(self) -> BloxError {
        if self.is_builder() {
            return BloxError::Config(format!("HTTP client configuration rejected: {self}"));
        }

        BloxError::Internal(format!("HTTP client construction failed: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_blox())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
