use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

/// Hidden form field and cookie name carrying the token.
pub const CSRF_FIELD: &str = "csrf_token";

/// Returns the token bound to this browser, minting a new one when the signed
/// cookie is absent or was rejected.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(cookie) = jar.get(CSRF_FIELD) {
        if !cookie.value().is_empty() {
            let token = cookie.value().to_string();
            return (jar, token);
        }
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((CSRF_FIELD, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict);
    (jar.add(cookie), token)
}

/// The submitted token must equal the one in the signed cookie.
pub fn verify(jar: &SignedCookieJar, submitted: &str) -> bool {
    let submitted = submitted.trim();
    !submitted.is_empty() && jar.get(CSRF_FIELD).is_some_and(|c| c.value() == submitted)
}
