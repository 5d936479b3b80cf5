//! # calcd
//!
//! A stateless arithmetic microservice. Seven `GET` endpoints, two query
//! parameters, one JSON answer.
//!
//! ```text
//! GET /add?num1=2&num2=3        → 200 {"operation":"addition","num1":"2","num2":"3","result":5.0}
//! GET /sqrt?num1=16             → 200 {"operation":"square root","num1":"16","result":4.0}
//! GET /divide?num1=1&num2=0     → 400 {"error":"Division by zero is not allowed."}
//! ```
//!
//! Routes: `/add`, `/subtract`, `/multiply`, `/divide`, `/exponentiate`,
//! `/sqrt`, `/modulo`, plus `/healthz` and `/readyz`.
//!
//! The pieces:
//!
//! - [`calc`] does the arithmetic and knows nothing about HTTP.
//! - [`api`] maps each [`Operation`] onto a route.
//! - [`Router`], [`Server`], [`Request`], [`Response`] are a small hyper-based
//!   HTTP layer: radix-tree routing via [`matchit`], tokio I/O, graceful
//!   shutdown on SIGTERM / Ctrl-C.
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use calcd::{Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), calcd::Error> {
//!     Server::bind(([127, 0, 0, 1], 3000).into())
//!         .serve(api::router())
//!         .await
//! }
//! ```

pub mod api;
pub mod calc;
pub mod config;
pub mod health;

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub use calc::{Arity, CalcError, DomainError, Operation};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{ErrorBody, IntoResponse, Json, Response};
pub use router::Router;
pub use server::{Server, serve_with_shutdown};
