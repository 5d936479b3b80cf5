//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. A path that matches under
//! some other method resolves to 405 instead of 404.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// The application router.
///
/// Built once at startup and handed to [`Server::serve`](crate::Server::serve),
/// which shares it read-only across every connection.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

/// Outcome of a lookup.
pub(crate) enum Route {
    Found(BoxedHandler),
    /// The path exists, just not for this method. Carries the methods that
    /// would have matched, for the `allow` header.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a `GET` handler. `HEAD` requests on the same path are served
    /// by it too.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or is already registered for
    /// `method`. Routes are fixed at startup, so this is a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Route {
        if let Some(handler) = self.find(method, path) {
            return Route::Found(handler);
        }
        if *method == Method::HEAD {
            if let Some(handler) = self.find(&Method::GET, path) {
                return Route::Found(handler);
            }
        }

        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| method.clone())
            .collect();

        if allowed.is_empty() {
            return Route::NotFound;
        }
        if allowed.contains(&Method::GET) && !allowed.contains(&Method::HEAD) {
            allowed.push(Method::HEAD);
        }
        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Route::MethodNotAllowed(allowed)
    }

    fn find(&self, method: &Method, path: &str) -> Option<BoxedHandler> {
        let matched = self.routes.get(method)?.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;
    use crate::request::Request;

    async fn ok(_req: Request) -> StatusCode {
        StatusCode::OK
    }

    fn router() -> Router {
        Router::new()
            .get("/add", ok)
            .on(Method::DELETE, "/add", ok)
            .on(Method::POST, "/submit", ok)
    }

    #[test]
    fn finds_registered_route() {
        assert!(matches!(router().lookup(&Method::GET, "/add"), Route::Found(_)));
        assert!(matches!(router().lookup(&Method::POST, "/submit"), Route::Found(_)));
    }

    #[test]
    fn head_falls_back_to_get() {
        assert!(matches!(router().lookup(&Method::HEAD, "/add"), Route::Found(_)));
        assert!(matches!(
            router().lookup(&Method::HEAD, "/submit"),
            Route::MethodNotAllowed(_),
        ));
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert!(matches!(router().lookup(&Method::GET, "/nope"), Route::NotFound));
        assert!(matches!(router().lookup(&Method::GET, "/add/extra"), Route::NotFound));
    }

    #[test]
    fn wrong_method_lists_allowed_methods() {
        match router().lookup(&Method::PUT, "/add") {
            Route::MethodNotAllowed(allowed) => {
                assert_eq!(allowed, [Method::DELETE, Method::GET, Method::HEAD]);
            }
            _ => panic!("expected 405"),
        }
    }

    #[test]
    #[should_panic(expected = "invalid route `/add`")]
    fn duplicate_route_panics() {
        let _ = Router::new().get("/add", ok).get("/add", ok);
    }
}
