//! Account profiles HTTP API.
mod create;
mod delete;
mod get;
mod update;

use axum::Router;
use axum::routing::{get, post};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // `POST /accounts` goes to `create`.
        .route("/accounts", post(create::handler))
        // `GET`, `PUT` and `DELETE /accounts/:ID`.
        .route(
            "/accounts/{id}",
            get(get::handler)
                .put(update::handler)
                .delete(delete::handler),
        )
}
