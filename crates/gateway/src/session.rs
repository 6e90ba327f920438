//! Client session cookie.
//!
//! Each client carries an opaque `gamechat_session` cookie. Requests
//! without a usable cookie get a fresh id, which is handed back through
//! `Set-Cookie` on the response.

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use gamechat_core::session::SessionId;
use std::convert::Infallible;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "gamechat_session";

const MAX_ID_LEN: usize = 64;

/// The session a request belongs to.
#[derive(Debug, Clone)]
pub struct ClientSession {
    pub id: SessionId,
    /// Set when the id was minted for this request.
    pub minted: bool,
}

impl ClientSession {
    /// Add `Set-Cookie` to `response` when the id is new.
    pub fn attach(&self, mut response: Response) -> Response {
        if self.minted {
            let cookie = format!("{SESSION_COOKIE}={}; HttpOnly; SameSite=Lax; Path=/", self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match session_from_headers(&parts.headers) {
            Some(id) => Self { id, minted: false },
            None => Self {
                id: SessionId::new(),
                minted: true,
            },
        })
    }
}

fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && is_valid_id(value))
        .map(|(_, value)| SessionId::from(value))
}

fn is_valid_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_ID_LEN
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::response::IntoResponse;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for cookie in cookies {
            map.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        map
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let id = session_from_headers(&headers(&["theme=dark; gamechat_session=abc-123; lang=en"]));
        assert_eq!(id, Some(SessionId::from("abc-123")));
    }

    #[test]
    fn finds_session_in_second_cookie_header() {
        let id = session_from_headers(&headers(&["theme=dark", "gamechat_session=xyz"]));
        assert_eq!(id, Some(SessionId::from("xyz")));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(session_from_headers(&headers(&["gamechat_session="])).is_none());
        assert!(session_from_headers(&headers(&["gamechat_session=a b"])).is_none());
        assert!(session_from_headers(&headers(&["gamechat_session=../etc"])).is_none());
        let long = format!("gamechat_session={}", "a".repeat(65));
        assert!(session_from_headers(&headers(&[&long])).is_none());
        assert!(session_from_headers(&HeaderMap::new()).is_none());
    }

    #[tokio::test]
    async fn missing_cookie_mints_and_sets() {
        let (mut parts, _) = Request::builder().uri("/query").body(()).unwrap().into_parts();
        let session = ClientSession::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(session.minted);

        let response = session.attach(().into_response());
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with(&format!("gamechat_session={}", session.id)));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[tokio::test]
    async fn known_cookie_is_not_reset() {
        let (mut parts, _) = Request::builder()
            .uri("/query")
            .header(COOKIE, "gamechat_session=known")
            .body(())
            .unwrap()
            .into_parts();
        let session = ClientSession::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(!session.minted);
        assert_eq!(session.id.as_str(), "known");

        let response = session.attach(().into_response());
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}
