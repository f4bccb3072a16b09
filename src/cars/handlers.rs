use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    dto::{CarPayload, CarResponse},
    validation::validate_car,
};
use crate::{
    auth::RequireAdmin,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/:id", get(get_car).put(update_car).delete(delete_car))
}

#[instrument(skip(state, payload))]
pub async fn create_car(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<CarPayload>,
) -> AppResult<(StatusCode, Json<CarResponse>)> {
    let car = validate_car(payload, OffsetDateTime::now_utc())?;
    let car = state.cars.create(car).await?;
    info!(car_id = car.id, by = admin.id, "car created");
    Ok((StatusCode::CREATED, Json(CarResponse::from(car))))
}

#[instrument(skip(state))]
pub async fn list_cars(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<CarResponse>>> {
    let cars = state.cars.list().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_car(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> AppResult<Json<CarResponse>> {
    let car = state.cars.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(CarResponse::from(car)))
}

#[instrument(skip(state, payload))]
pub async fn update_car(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(payload): Json<CarPayload>,
) -> AppResult<StatusCode> {
    let car = validate_car(payload, OffsetDateTime::now_utc())?;
    if state.cars.update(id, car).await? {
        info!(car_id = id, by = admin.id, "car updated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

#[instrument(skip(state))]
pub async fn delete_car(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if state.cars.delete(id).await? {
        info!(car_id = id, by = admin.id, "car deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
