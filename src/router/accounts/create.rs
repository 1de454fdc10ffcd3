use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Result, ServerError};
use crate::profile::{CreateProfile, ProfileService, ProfileView};
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Identifier must be 1 to 128 characters long."
    ))]
    pub id: String,
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    #[validate(length(
        min = 2,
        max = 100,
        message = "First name must be 2 to 100 characters long."
    ))]
    pub first_name: String,
    #[validate(length(
        min = 2,
        max = 100,
        message = "Last name must be 2 to 100 characters long."
    ))]
    pub last_name: String,
    #[validate(custom(
        function = "crate::router::validate_phone",
        message = "Phone must be a phone number."
    ))]
    pub phone: String,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Street name must be 1 to 200 characters long."
    ))]
    pub street_name: String,
    #[validate(custom(
        function = "crate::router::validate_postal_code",
        message = "Postal code must be exactly 5 digits."
    ))]
    pub postal_code: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "City must be 1 to 100 characters long."
    ))]
    pub city: String,
}

impl From<Body> for CreateProfile {
    fn from(body: Body) -> Self {
        Self {
            id: body.id,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
            street_name: body.street_name,
            postal_code: body.postal_code,
            city: body.city,
        }
    }
}

/// Handler to create an account profile.
pub async fn handler(
    State(profiles): State<ProfileService>,
    Valid(body): Valid<Body>,
) -> Result<Json<ProfileView>> {
    let outcome = profiles.create(body.into()).await?;

    match outcome.result {
        Some(profile) => Ok(Json(ProfileView::from(&profile))),
        None => Err(ServerError::AlreadyExists(outcome.message)),
    }
}
