use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    dto::{CustomerPayload, CustomerResponse},
    validation::validate_customer,
};
use crate::{
    auth::RequireAdmin,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_customer(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<CustomerPayload>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    let customer = validate_customer(payload, OffsetDateTime::now_utc())?;
    let customer = state.customers.create(customer).await?;
    info!(customer_id = customer.id, by = admin.id, "customer created");
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

#[instrument(skip(state))]
pub async fn list_customers(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<CustomerResponse>>> {
    let customers = state.customers.list().await?;
    Ok(Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

#[instrument(skip(state))]
pub async fn get_customer(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> AppResult<Json<CustomerResponse>> {
    let customer = state
        .customers
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(CustomerResponse::from(customer)))
}

#[instrument(skip(state, payload))]
pub async fn update_customer(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerPayload>,
) -> AppResult<StatusCode> {
    let customer = validate_customer(payload, OffsetDateTime::now_utc())?;
    if !state.customers.update(id, customer).await? {
        return Err(AppError::NotFound);
    }
    info!(customer_id = id, by = admin.id, "customer updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_customer(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !state.customers.delete(id).await? {
        return Err(AppError::NotFound);
    }
    info!(customer_id = id, by = admin.id, "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
