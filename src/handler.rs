//! Route handlers and their type-erased form.
//!
//! A route is registered with any `async fn(Request) -> impl IntoResponse`
//! or a closure returning such a future, e.g.
//! `move |req: Request| api::calculate(op, req)`. The router stores each one
//! as a [`BoxedHandler`]: a shared closure that boxes the handler's future
//! and converts its output into a [`Response`] once it resolves.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// `Send + 'static` so the dispatcher can hand it to `tokio::spawn`.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Shared by every connection task; one `Arc` clone per request.
pub(crate) type BoxedHandler = Arc<dyn Fn(Request) -> BoxFuture + Send + Sync + 'static>;

/// Anything that can serve a route.
pub trait Handler: Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(move |req: Request| {
            let fut = self(req);
            Box::pin(async move { fut.await.into_response() }) as BoxFuture
        })
    }
}
