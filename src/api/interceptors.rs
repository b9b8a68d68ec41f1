//! The two hooks wrapped around every transport call.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use tracing::warn;

use super::error::ApiError;
use super::request::ApiRequest;
use crate::models::Session;
use crate::navigation::{Navigator, LOGIN_PATH};
use crate::session::SessionStore;

pub const X_USER_EMAIL: HeaderName = HeaderName::from_static("x-user-email");
pub const X_USER_ROLE: HeaderName = HeaderName::from_static("x-user-role");

/// Request interceptor: writes the identity headers for `session`.
///
/// A missing (or empty) session field removes its header, including one a
/// caller passed in, so a reused request never carries a previous user's
/// identity. Never fails: a value that cannot be a header is dropped.
pub fn attach_auth(mut request: ApiRequest, session: &Session) -> ApiRequest {
    let bearer = non_empty(&session.token).map(|token| format!("Bearer {}", token));
    set_or_remove(&mut request.headers, AUTHORIZATION, bearer, true);
    set_or_remove(
        &mut request.headers,
        X_USER_EMAIL,
        non_empty(&session.email).map(str::to_string),
        false,
    );
    set_or_remove(
        &mut request.headers,
        X_USER_ROLE,
        non_empty(&session.role).map(str::to_string),
        false,
    );
    request
}

/// Response interceptor: a 401 clears the session and sends the host to
/// the login page. The result itself always comes back untouched.
pub fn handle_response<T>(
    result: Result<T, ApiError>,
    session: &dyn SessionStore,
    navigator: &dyn Navigator,
) -> Result<T, ApiError> {
    if let Err(err) = &result {
        if err.is_unauthorized() {
            invalidate(session, navigator);
        }
    }
    result
}

/// Clear every session key, then redirect. Safe to run any number of times.
pub fn invalidate(session: &dyn SessionStore, navigator: &dyn Navigator) {
    warn!("authentication rejected, clearing session");
    if let Err(e) = session.clear() {
        warn!(error = %e, "failed to clear session");
    }
    navigator.go_to(LOGIN_PATH);
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn set_or_remove(headers: &mut HeaderMap, name: HeaderName, value: Option<String>, sensitive: bool) {
    headers.remove(&name);
    let Some(value) = value else {
        return;
    };
    match HeaderValue::from_str(&value) {
        Ok(mut header) => {
            header.set_sensitive(sensitive);
            headers.insert(name, header);
        }
        Err(_) => warn!(header = %name, "session value is not a valid header value, omitting"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn empty_token_is_treated_as_absent() {
        let session = Session {
            token: Some(String::new()),
            email: Some("e@x.com".to_string()),
            role: None,
        };
        let request = attach_auth(ApiRequest::new(Method::GET, "/tickets"), &session);
        assert!(request.headers.get(AUTHORIZATION).is_none());
        assert_eq!(request.headers.get(X_USER_EMAIL).unwrap(), "e@x.com");
    }

    #[test]
    fn invalid_header_value_is_dropped() {
        let session = Session::authenticated("abc", "bad\nemail", "user");
        let request = attach_auth(ApiRequest::new(Method::GET, "/tickets"), &session);
        assert!(request.headers.get(X_USER_EMAIL).is_none());
        assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(request.headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }
}
