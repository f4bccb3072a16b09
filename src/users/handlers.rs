use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::{
    dto::{CreateUserRequest, LoginRequest, LoginResponse, PublicUser, UpdateUserRequest},
    repo_types::{NewUser, UserChanges},
};
use crate::{
    auth::{
        cookies::{removal_cookie, session_cookie},
        password::{hash_password_blocking, verify_password_blocking},
        policy::{authorize, Requirement},
        Caller, RequireAdmin, SessionUser,
    },
    error::{AppError, AppResult},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/users/login", post(login))
        .route("/users/logout", post(logout))
        .route("/users/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let payload = payload.normalized();
    payload.validate()?;

    let password_hash = hash_password_blocking(payload.password).await?;
    let user = state
        .users
        .create(NewUser {
            username: payload.username,
            email: payload.email,
            password_hash,
            is_admin: payload.is_admin,
        })
        .await?;

    info!(user_id = user.id, by = admin.id, "user created");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<PublicUser>>> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> AppResult<Json<PublicUser>> {
    authorize(caller.identity(), Some(id), Requirement::AdminOrOwner)?;

    let user = state.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<StatusCode> {
    let payload = payload.normalized();
    payload.validate()?;

    let password_hash = match payload.password {
        Some(plain) => Some(hash_password_blocking(plain).await?),
        None => None,
    };
    let changes = UserChanges {
        username: payload.username,
        email: payload.email,
        password_hash,
        is_admin: payload.is_admin,
    };

    if state.users.update(id, changes).await? {
        info!(user_id = id, by = admin.id, "user updated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if state.users.delete(id).await? {
        info!(user_id = id, by = admin.id, "user deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let email = payload
        .email
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let Some(user) = state.users.find_by_login(username, email.as_deref()).await? else {
        warn!("login unknown identifier");
        return Err(AppError::Unauthorized);
    };

    let ok = verify_password_blocking(payload.password, user.password.clone()).await?;
    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized);
    }

    let token = state
        .jwt
        .sign(&SessionUser::from(&user), OffsetDateTime::now_utc())?;
    let cookie = session_cookie(&state.config.cookie_name, token, state.jwt.ttl);

    info!(user_id = user.id, "user logged in");
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user: PublicUser::from(user),
        }),
    ))
}

#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.add(removal_cookie(&state.config.cookie_name)),
        StatusCode::NO_CONTENT,
    )
}

#[instrument]
pub async fn me(caller: Caller) -> AppResult<Json<SessionUser>> {
    caller.0.map(Json).ok_or(AppError::Unauthorized)
}
