//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! The service has no dependencies to wait on, so both answer 200 as soon as
//! the listener is up.

use serde::{Deserialize, Serialize};

use crate::request::Request;
use crate::response::Json;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Probe {
    pub status: String,
}

/// `200 {"status":"ok"}`
pub async fn liveness(_req: Request) -> Json<Probe> {
    Json(Probe { status: "ok".to_owned() })
}

/// `200 {"status":"ready"}`
pub async fn readiness(_req: Request) -> Json<Probe> {
    Json(Probe { status: "ready".to_owned() })
}
