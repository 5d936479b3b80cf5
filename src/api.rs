//! The HTTP surface: one `GET` route per [`Operation`] plus health probes.
//!
//! | Route | Query | Success body |
//! |---|---|---|
//! | `/add`, `/subtract`, `/multiply`, `/divide`, `/exponentiate`, `/modulo` | `num1`, `num2` | `{operation, num1, num2, result}` |
//! | `/sqrt` | `num1` | `{operation, num1, result}` |
//! | `/healthz`, `/readyz` | none | `{status}` |
//!
//! Failures are `400 {"error": ...}`; see [`CalcError`].

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::calc::{Arity, CalcError, Operation};
use crate::health;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};

/// A successful calculation.
///
/// `num1` and `num2` echo the query values verbatim, not the parsed numbers.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Calculation {
    pub operation: String,
    pub num1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num2: Option<String>,
    /// `null` on the wire when the result is not finite.
    pub result: Option<f64>,
}

/// Builds the full route table.
///
/// ```rust,no_run
/// # async fn run() -> Result<(), calcd::Error> {
/// calcd::Server::bind(([0, 0, 0, 0], 3000).into())
///     .serve(calcd::api::router())
///     .await
/// # }
/// ```
pub fn router() -> crate::Router {
    let mut router = crate::Router::new()
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness);

    for op in Operation::ALL {
        router = router.get(op.path(), move |req: Request| calculate(op, req));
    }
    router
}

/// Handler shared by every operation route.
pub async fn calculate(op: Operation, req: Request) -> Result<Json<Calculation>, CalcError> {
    let num1 = req.query("num1");
    let num2 = match op.arity() {
        Arity::Unary => None,
        Arity::Binary => req.query("num2"),
    };

    let result = op.evaluate(num1, num2)?;

    Ok(Json(Calculation {
        operation: op.name().to_owned(),
        num1: num1.unwrap_or_default().to_owned(),
        num2: num2.map(str::to_owned),
        result: Some(result).filter(|r| r.is_finite()),
    }))
}

impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        Response::error(StatusCode::BAD_REQUEST, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ErrorBody;

    async fn call(op: Operation, uri: &str) -> Response {
        let req = http::Request::get(uri).body(()).unwrap();
        calculate(op, Request::new(&req)).await.into_response()
    }

    fn success(res: &Response) -> Calculation {
        assert_eq!(res.status_code(), StatusCode::OK);
        serde_json::from_slice(res.body()).unwrap()
    }

    fn failure(res: &Response) -> String {
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        serde_json::from_slice::<ErrorBody>(res.body()).unwrap().error
    }

    #[tokio::test]
    async fn echoes_raw_operands() {
        let res = call(Operation::Add, "/add?num1=1.50&num2=%202").await;
        assert_eq!(
            success(&res),
            Calculation {
                operation: "addition".into(),
                num1: "1.50".into(),
                num2: Some(" 2".into()),
                result: Some(3.5),
            },
        );
    }

    #[tokio::test]
    async fn sqrt_omits_num2() {
        let res = call(Operation::Sqrt, "/sqrt?num1=16&num2=9").await;
        assert_eq!(res.body(), br#"{"operation":"square root","num1":"16","result":4.0}"#);
    }

    #[tokio::test]
    async fn overflow_serialises_as_null() {
        let res = call(Operation::Exponentiate, "/exponentiate?num1=10&num2=400").await;
        assert_eq!(success(&res).result, None);
    }

    #[tokio::test]
    async fn errors_are_400_with_message() {
        let res = call(Operation::Divide, "/divide?num1=10&num2=0").await;
        assert_eq!(failure(&res), "Division by zero is not allowed.");

        let res = call(Operation::Sqrt, "/sqrt?num1=-4").await;
        assert_eq!(failure(&res), "Square root of a negative number is not supported.");

        let res = call(Operation::Multiply, "/multiply?num1=2").await;
        assert_eq!(failure(&res), "Invalid input. Both num1 and num2 must be numbers.");
    }
}
