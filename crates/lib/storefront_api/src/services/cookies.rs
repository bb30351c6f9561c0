//! Cookie service. Builds the httpOnly cookies that carry auth tokens.
//!
//! Cookie names follow the `<app>_access` / `<app>_refresh` convention:
//! `storefront_access`, `storefront_refresh`. The `secure` flag comes from
//! configuration so local development over plain HTTP keeps working.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use storefront_core::auth::jwt::{ACCESS_TOKEN_EXPIRY_SECS, REFRESH_TOKEN_EXPIRY_SECS};

/// Cookie name for the access token.
pub const ACCESS_COOKIE: &str = "storefront_access";
/// Cookie name for the refresh token.
pub const REFRESH_COOKIE: &str = "storefront_refresh";

/// Build the httpOnly cookie carrying the access token (15 min).
pub fn access_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .max_age(Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS))
        .build()
}

/// Build the httpOnly cookie carrying the refresh token (7 days).
pub fn refresh_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .max_age(Duration::seconds(REFRESH_TOKEN_EXPIRY_SECS))
        .build()
}

/// Build an expired cookie to clear the access token.
pub fn clear_access_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE.to_string(), String::new()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}

/// Build an expired cookie to clear the refresh token.
pub fn clear_refresh_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE.to_string(), String::new()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_cookie_attributes() {
        let cookie = access_cookie("tok", true);
        assert_eq!(ACCESS_COOKIE, cookie.name());
        assert_eq!("tok", cookie.value());
        assert_eq!(Some(true), cookie.http_only());
        assert_eq!(Some(true), cookie.secure());
        assert_eq!(Some(SameSite::Strict), cookie.same_site());
        assert_eq!(Some("/"), cookie.path());
        assert_eq!(Some(Duration::minutes(15)), cookie.max_age());
    }

    #[test]
    fn refresh_cookie_lives_seven_days() {
        let cookie = refresh_cookie("tok", false);
        assert_eq!(REFRESH_COOKIE, cookie.name());
        assert_eq!(Some(Duration::days(7)), cookie.max_age());
        assert_eq!(Some(false), cookie.secure());
    }

    #[test]
    fn clear_cookies_expire_immediately() {
        let access = clear_access_cookie(false);
        let refresh = clear_refresh_cookie(false);
        assert_eq!(Some(Duration::ZERO), access.max_age());
        assert_eq!(Some(Duration::ZERO), refresh.max_age());
        assert_eq!("", access.value());
        assert_eq!("", refresh.value());
    }
}
