//! Delete an account profile and its address.

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::error::{Result, ServerError};
use crate::profile::ProfileService;

pub async fn handler(
    Path(id): Path<String>,
    State(profiles): State<ProfileService>,
) -> Result<StatusCode> {
    let outcome = profiles.delete(&id).await?;

    if !outcome.succeeded {
        return Err(ServerError::NotFound(outcome.message));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::router::accounts::create::tests::body;
    use crate::*;

    #[tokio::test]
    async fn test_delete_handler() {
        let app = app(router::state());

        make_request(
            app.clone(),
            Method::POST,
            "/accounts",
            json!(body("u1", "a@b.com")).to_string(),
        )
        .await;

        let response = make_request(
            app.clone(),
            Method::DELETE,
            "/accounts/u1",
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Profile must be deleted.
        let response =
            make_request(app, Method::GET, "/accounts/u1", String::default())
                .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_profile() {
        let app = app(router::state());

        let response = make_request(
            app,
            Method::DELETE,
            "/accounts/unknown",
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
