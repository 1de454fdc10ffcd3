//! Public server status.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::config::Configuration;

/// Structured status.
#[derive(Debug, Serialize, Deserialize)]
pub struct Status {
    version: String,
    name: String,
}

/// Public server status (instance name and version).
pub async fn status(State(config): State<Arc<Configuration>>) -> Json<Status> {
    Json(Status {
        version: env!("CARGO_PKG_VERSION").into(),
        name: if config.name.is_empty() {
            env!("CARGO_CRATE_NAME").into()
        } else {
            config.name.clone()
        },
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    use super::*;
    use crate::*;

    #[tokio::test]
    async fn test_status_handler() {
        let app = app(router::state());

        let response =
            make_request(app, Method::GET, "/status.json", String::default())
                .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Status = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(body.name, "account_service");
    }
}
