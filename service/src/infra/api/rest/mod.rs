//! REST [`Api`] implementation.

mod impls;
pub mod session;

use std::time::Duration;

use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::infra::api;
#[cfg(doc)]
use crate::infra::Api;

pub use self::session::Store;

/// [`Rest`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the API server.
    #[default("http://localhost:8000".to_owned())]
    pub base_url: String,

    /// Versioned path prefix of every API endpoint.
    #[default("/api/v1".to_owned())]
    pub prefix: String,

    /// Timeout of a single request.
    #[default(Duration::from_secs(30))]
    pub timeout: Duration,
}

/// REST [`Api`] client.
#[derive(Clone, Debug)]
pub struct Rest {
    /// HTTP client performing requests.
    client: reqwest::Client,

    /// Base URL every path is appended to, including the prefix.
    base: String,

    /// [`Store`] of the current session.
    session: Store,
}

/// Kind of a call performed by a [`Rest`] client.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Call {
    /// Call authenticated with the current session, if any.
    Regular,

    /// Login call, never invalidating the current session.
    Login,
}

impl Rest {
    /// Creates a new [`Rest`] client with the provided [`Config`] and
    /// session [`Store`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client failed to initialize.
    pub fn new(
        conf: &Config,
        session: Store,
    ) -> Result<Self, Traced<api::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;

        let prefix = conf.prefix.trim_matches('/');
        let mut base = conf.base_url.trim_end_matches('/').to_owned();
        if !prefix.is_empty() {
            base.push('/');
            base.push_str(prefix);
        }

        Ok(Self {
            client,
            base,
            session,
        })
    }

    /// Returns the session [`Store`] of this [`Rest`] client.
    #[must_use]
    pub fn session(&self) -> &Store {
        &self.session
    }

    /// Returns the full URL of the provided API `path`.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// Sends the provided request, authenticated with the current session
    /// unless it's a [`Call::Login`].
    ///
    /// A `401` response to a [`Call::Regular`] invalidates the current
    /// session.
    async fn send(
        &self,
        req: RequestBuilder,
        call: Call,
    ) -> Result<Response, Traced<api::Error>> {
        let req = match (call, self.session.session()) {
            (Call::Regular, Some(session)) => {
                req.header(header::AUTHORIZATION, session.authorization())
            }
            (Call::Regular, None) | (Call::Login, _) => req,
        };

        let req = req
            .build()
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;
        let (method, url) = (req.method().clone(), req.url().clone());

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;

        let status = resp.status();
        log::debug!(%method, %url, status = status.as_u16(), "API responded");
        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED && call == Call::Regular {
            log::warn!("API rejected the session of `{method} {url}`");
            self.session.invalidate();
        }

        let message = match resp.bytes().await {
            Ok(body) => error_message(&body),
            Err(e) => {
                log::debug!(%method, %url, "failed to read error body: {e}");
                None
            }
        };
        if status == StatusCode::UNAUTHORIZED {
            return Err(tracerr::new!(api::Error::Unauthorized { message }));
        }
        Err(tracerr::new!(api::Error::Status {
            status: status.as_u16(),
            message,
        }))
    }

    /// Receives the body of the provided [`Response`].
    async fn body(resp: Response) -> Result<Vec<u8>, Traced<api::Error>> {
        resp.bytes()
            .await
            .map(Vec::from)
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }

    /// Decodes the JSON body of the provided [`Response`].
    async fn json<T: DeserializeOwned>(
        resp: Response,
    ) -> Result<T, Traced<api::Error>> {
        let body = Self::body(resp).await.map_err(tracerr::wrap!())?;
        serde_json::from_slice(&body)
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }
}

/// Extracts the error message from the provided error response `body`.
///
/// `detail`, `error` and `message` fields are looked up in order. Structured
/// details (like validation errors) are rendered as JSON.
fn error_message(body: &[u8]) -> Option<String> {
    let value = serde_json::from_slice::<Value>(body).ok()?;
    ["detail", "error", "message"]
        .into_iter()
        .find_map(|field| match value.get(field)? {
            Value::String(msg) => Some(msg.clone()),
            v @ (Value::Array(_) | Value::Object(_)) => Some(v.to_string()),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        })
}

#[cfg(test)]
mod spec {
    use super::{error_message, Config, Rest, Store};

    #[test]
    fn joins_base_url_and_prefix() {
        let rest = Rest::new(
            &Config {
                base_url: "http://api.local:8000/".to_owned(),
                prefix: "api/v1/".to_owned(),
                ..Config::default()
            },
            Store::in_memory(),
        )
        .unwrap();
        assert_eq!(
            rest.url("/products"),
            "http://api.local:8000/api/v1/products",
        );

        let bare = Rest::new(
            &Config {
                prefix: String::new(),
                ..Config::default()
            },
            Store::in_memory(),
        )
        .unwrap();
        assert_eq!(bare.url("durations"), "http://localhost:8000/durations");
    }

    #[test]
    fn extracts_error_message() {
        assert_eq!(
            error_message(br#"{"detail": "Order not found"}"#).as_deref(),
            Some("Order not found"),
        );
        assert_eq!(
            error_message(br#"{"error": "boom", "message": "ignored"}"#)
                .as_deref(),
            Some("boom"),
        );
        assert_eq!(
            error_message(br#"{"message": "bad"}"#).as_deref(),
            Some("bad"),
        );
        assert_eq!(
            error_message(br#"{"detail": [{"loc": ["body"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body"]}]"#),
        );
        assert_eq!(error_message(br#"{"detail": null}"#), None);
        assert_eq!(error_message(b"Internal Server Error"), None);
    }
}
