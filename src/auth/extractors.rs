use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::{
    claims::SessionUser,
    policy::{authorize, Requirement},
};
use crate::error::AppError;

/// The identity the session middleware attached, if any. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<SessionUser>);

impl Caller {
    pub fn identity(&self) -> Option<&SessionUser> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<SessionUser>().cloned()))
    }
}

/// Requires an administrator. Rejects with 403 before the body is read.
#[derive(Debug)]
pub struct RequireAdmin(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts.extensions.get::<SessionUser>().cloned();
        authorize(caller.as_ref(), None, Requirement::Admin)?;
        match caller {
            Some(user) => Ok(RequireAdmin(user)),
            None => Err(AppError::Forbidden),
        }
    }
}
