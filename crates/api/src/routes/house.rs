//! Route definitions for the `/houses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::house;
use crate::state::AppState;

/// Routes mounted at `/houses`.
///
/// ```text
/// GET    /        -> list_all
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(house::list_all).post(house::create))
        .route(
            "/{id}",
            get(house::get_by_id).put(house::update).delete(house::delete),
        )
}
