//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Every body this service sends is JSON, so the constructors here take a
//! `Serialize` value rather than bytes. Handlers return anything that
//! implements [`IntoResponse`]: a [`Response`], a [`Json`] value, a bare
//! [`StatusCode`], or a `Result` of those.

use bytes::Bytes;
use http::header::{self, HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::Full;
use serde::{Deserialize, Serialize};
use tracing::error;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use calcd::Response;
/// use http::StatusCode;
///
/// Response::json(StatusCode::OK, &serde_json::json!({ "result": 4.0 }));
/// Response::error(StatusCode::BAD_REQUEST, "Division by zero is not allowed.");
/// Response::status(StatusCode::NO_CONTENT);
/// ```
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Bytes,
}

impl Response {
    /// Serialises `value` as an `application/json` body.
    ///
    /// A value serde_json refuses to encode becomes a bodyless 500. Non-finite
    /// floats are not a failure: serde_json writes them as `null`.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::with_body(status, "application/json", body),
            Err(e) => {
                error!("failed to serialise response body: {e}");
                Self::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::json(status, &ErrorBody { error: message.into() })
    }

    /// Response with no body.
    pub fn status(status: StatusCode) -> Self {
        Self { status, headers: Vec::new(), body: Bytes::new() }
    }

    /// Appends a header. Returns `self` for chaining.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    fn with_body(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![(header::CONTENT_TYPE, HeaderValue::from_static(content_type))],
            body: Bytes::from(body),
        }
    }

    /// Converts into the `http` type hyper writes to the wire.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        let headers = res.headers_mut();
        for (name, value) in self.headers {
            headers.append(name, value);
        }
        res
    }
}

/// The body of every non-2xx JSON response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

// ── Json ──────────────────────────────────────────────────────────────────────

/// A `200 OK` JSON response built from any `Serialize` value.
///
/// ```rust
/// use calcd::{Json, Request};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Status { status: &'static str }
///
/// async fn liveness(_req: Request) -> Json<Status> {
///     Json(Status { status: "ok" })
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        Response::json(StatusCode::OK, &self.0)
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement it on error types to return them from handlers with `?`; see
/// [`CalcError`](crate::CalcError).
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a [`StatusCode`] directly from a handler: `return StatusCode::NOT_FOUND`
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        }
    }
}
