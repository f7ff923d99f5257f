//! Session cookie handling.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use tracing::warn;

use crate::store::{SessionId, SessionRegistry, SharedStore};

/// Find the session identifier in the request cookies.
///
/// A cookie whose value is not a valid identifier is ignored.
pub(crate) fn session_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// `Set-Cookie` value binding the client to a session.
pub(crate) fn set_cookie_value(cookie_name: &str, id: SessionId) -> Option<HeaderValue> {
    let cookie = format!("{cookie_name}={id}; Path=/; HttpOnly; SameSite=Lax");
    match HeaderValue::from_str(&cookie) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Could not encode session cookie");
            None
        }
    }
}

/// The store of the request's session, if the request names a live one.
///
/// Never starts a session.
pub(crate) fn existing_store(
    registry: &SessionRegistry,
    headers: &HeaderMap,
    cookie_name: &str,
) -> Option<SharedStore> {
    session_from_headers(headers, cookie_name).and_then(|id| registry.get(id))
}

/// The session a request belongs to.
#[derive(Debug)]
pub(crate) struct RequestSession {
    pub(crate) store: SharedStore,
    set_cookie: Option<HeaderValue>,
}

impl RequestSession {
    /// Resolve the request's session, starting a new one if the request
    /// carries none.
    pub(crate) fn open(
        registry: &SessionRegistry,
        headers: &HeaderMap,
        cookie_name: &str,
    ) -> Self {
        if let Some(id) = session_from_headers(headers, cookie_name) {
            return Self {
                store: registry.init(id),
                set_cookie: None,
            };
        }

        let id = SessionId::generate();
        Self {
            store: registry.init(id),
            set_cookie: set_cookie_value(cookie_name, id),
        }
    }

    /// Attach the session cookie to a response if the session is new.
    pub(crate) fn finish(self, mut response: Response) -> Response {
        if let Some(cookie) = self.set_cookie {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
        response
    }
}
