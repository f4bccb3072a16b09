use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::OffsetDateTime;

/// Session cookie: http-only, secure, cross-site, alive as long as the token.
pub fn session_cookie(name: &str, token: String, ttl: Duration) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::seconds(ttl.as_secs() as i64))
        .build()
}

/// Already-expired cookie overwriting [`session_cookie`] in the browser.
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}
