pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::HttpState;

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/pages/:page", get(routes::page_content))
        .route("/api/detect", post(routes::detect))
        .route("/api/contact", post(routes::submit_contact))
        .route("/api/model", get(routes::model_info))
        .route("/api/model/classes", post(routes::set_classes))
        // Las fotos de campo suelen pasar del límite de 2 MB por defecto.
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .with_state(state)
}
