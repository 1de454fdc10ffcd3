use axum::Json;
use axum::extract::{Path, State};

use crate::error::{Result, ServerError};
use crate::profile::{ProfileService, ProfileView};

pub async fn handler(
    Path(id): Path<String>,
    State(profiles): State<ProfileService>,
) -> Result<Json<ProfileView>> {
    let outcome = profiles.get_by_id(&id).await?;

    match outcome.result {
        Some(profile) => Ok(Json(ProfileView::from(&profile))),
        None => Err(ServerError::NotFound(outcome.message)),
    }
}
