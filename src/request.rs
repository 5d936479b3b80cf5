//! Incoming HTTP request view.

use url::form_urlencoded;

/// What a handler gets to see of an incoming request.
///
/// The body is never read; every endpoint takes its input from the query
/// string.
pub struct Request {
    query: Vec<(String, String)>,
}

impl Request {
    pub(crate) fn new<B>(req: &http::Request<B>) -> Self {
        let query = req.uri()
            .query()
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        Self { query }
    }

    /// Returns the percent-decoded value of query parameter `key`.
    ///
    /// If the key is repeated (`?num1=1&num1=2`) the first occurrence wins.
    /// A key with no `=` yields `Some("")`.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
