//! HTTP API.

pub mod accounts;
pub mod status;

use std::sync::LazyLock;

use axum::Json;
use axum::extract::{FromRequest, Request};
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::ServerError;

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ().\-]{4,22}[0-9]$").expect("invalid phone pattern")
});
static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{5}$").expect("invalid postal code pattern")
});

/// Check `phone` looks like a phone number, international prefix and
/// parenthesized area code allowed.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !PHONE.is_match(phone) {
        return Err(ValidationError::new("phone"));
    }

    Ok(())
}

/// Check `postal_code` is exactly five digits.
pub fn validate_postal_code(postal_code: &str) -> Result<(), ValidationError> {
    if !POSTAL_CODE.is_match(postal_code) {
        return Err(ValidationError::new("postal_code"));
    }

    Ok(())
}

/// JSON body extractor running [`Validate`] before reaching handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Valid<T>(pub T);

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Valid(value))
    }
}

/// In-memory state. MUST NEVER be used in production.
#[cfg(test)]
pub fn state() -> crate::AppState {
    use std::sync::Arc;

    use crate::profile::{MemoryProfileRepository, ProfileService};

    crate::AppState {
        config: Arc::new(crate::config::Configuration::default()),
        profiles: ProfileService::new(Arc::new(MemoryProfileRepository::new())),
        metrics: None,
    }
}
