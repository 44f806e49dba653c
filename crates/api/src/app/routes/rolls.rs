use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_rolls).post(create_roll))
        .route("/statistics", get(get_statistics))
        .route("/statistics/daily", get(get_daily_statistics))
        .route("/:id", get(get_roll).delete(delete_roll))
}

pub async fn create_roll(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateRollRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_input", e.body_text()),
    };

    match services.rolls().create(body.length, body.weight) {
        Ok(roll) => (
            StatusCode::CREATED,
            Json(dto::roll_to_json(&roll, services.zone())),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_roll(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_roll_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.rolls().delete(id) {
        Ok(roll) => Json(dto::roll_to_json(&roll, services.zone())).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_roll(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_roll_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.rolls().get(id) {
        Ok(roll) => Json(dto::roll_to_json(&roll, services.zone())).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_rolls(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::RollFilterQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_input", e.body_text()),
    };
    let filter = match query.into_filter(services.zone()) {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.rolls().list(&filter) {
        Ok(rolls) => {
            let zone = services.zone();
            let out: Vec<_> = rolls.iter().map(|r| dto::roll_to_json(r, zone)).collect();
            Json(out).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_statistics(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::StatisticsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_input", e.body_text()),
    };
    let (start, end) = match query.into_bounds(services.zone()) {
        Ok(b) => b,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let result = tokio::task::spawn_blocking(move || services.rolls().statistics(start, end)).await;

    match result {
        Ok(Ok(report)) => Json(report).into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

pub async fn get_daily_statistics(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::StatisticsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_input", e.body_text()),
    };
    let (start, end) = match query.into_bounds(services.zone()) {
        Ok(b) => b,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let result = tokio::task::spawn_blocking(move || services.rolls().daily(start, end)).await;

    match result {
        Ok(Ok(days)) => Json(days.iter().map(dto::daily_to_json).collect::<Vec<_>>()).into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}
