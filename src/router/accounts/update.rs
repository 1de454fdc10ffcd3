use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Result, ServerError};
use crate::profile::{ProfileService, ProfileView, UpdateProfile};
use crate::router::Valid;

/// Same fields as creation, `id` and `email` excepted.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[validate(length(
        min = 2,
        max = 100,
        message = "First name must be 2 to 100 characters long."
    ))]
    first_name: String,
    #[validate(length(
        min = 2,
        max = 100,
        message = "Last name must be 2 to 100 characters long."
    ))]
    last_name: String,
    #[validate(custom(
        function = "crate::router::validate_phone",
        message = "Phone must be a phone number."
    ))]
    phone: String,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Street name must be 1 to 200 characters long."
    ))]
    street_name: String,
    #[validate(custom(
        function = "crate::router::validate_postal_code",
        message = "Postal code must be exactly 5 digits."
    ))]
    postal_code: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "City must be 1 to 100 characters long."
    ))]
    city: String,
}

impl From<Body> for UpdateProfile {
    fn from(body: Body) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
            street_name: body.street_name,
            postal_code: body.postal_code,
            city: body.city,
        }
    }
}

pub async fn handler(
    Path(id): Path<String>,
    State(profiles): State<ProfileService>,
    Valid(body): Valid<Body>,
) -> Result<Json<ProfileView>> {
    let outcome = profiles.update(&id, body.into()).await?;

    match outcome.result {
        Some(profile) => Ok(Json(ProfileView::from(&profile))),
        None => Err(ServerError::NotFound(outcome.message)),
    }
}
