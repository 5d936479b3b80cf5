//! The arithmetic itself.
//!
//! Seven operations, one route each. Every operation reads its operands as
//! raw query strings, validates them, and produces a single `f64`. Nothing
//! here knows about HTTP; [`api`](crate::api) turns the outcome into a
//! response.

use tracing::debug;

// ── Operation ─────────────────────────────────────────────────────────────────

/// A supported arithmetic operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
    Sqrt,
    Modulo,
}

/// How many operands an operation reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    /// `num1` only.
    Unary,
    /// `num1` and `num2`.
    Binary,
}

impl Operation {
    /// Every operation, in the order the routes are registered.
    pub const ALL: [Operation; 7] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Exponentiate,
        Self::Sqrt,
        Self::Modulo,
    ];

    /// The route this operation is served on.
    pub fn path(self) -> &'static str {
        match self {
            Self::Add          => "/add",
            Self::Subtract     => "/subtract",
            Self::Multiply     => "/multiply",
            Self::Divide       => "/divide",
            Self::Exponentiate => "/exponentiate",
            Self::Sqrt         => "/sqrt",
            Self::Modulo       => "/modulo",
        }
    }

    /// The name echoed back in the `operation` field of a response.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add          => "addition",
            Self::Subtract     => "subtraction",
            Self::Multiply     => "multiplication",
            Self::Divide       => "division",
            Self::Exponentiate => "exponentiation",
            Self::Sqrt         => "square root",
            Self::Modulo       => "modulo",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::Sqrt => Arity::Unary,
            _          => Arity::Binary,
        }
    }

    /// Parses the operands, validates them and computes the result.
    ///
    /// `num2` is ignored by unary operations. A missing operand is treated
    /// exactly like a non-numeric one.
    ///
    /// ```rust
    /// use calcd::{CalcError, DomainError, Operation};
    ///
    /// assert_eq!(Operation::Add.evaluate(Some("2"), Some("3")), Ok(5.0));
    /// assert_eq!(
    ///     Operation::Divide.evaluate(Some("1"), Some("0")),
    ///     Err(CalcError::Domain(DomainError::DivisionByZero)),
    /// );
    /// ```
    pub fn evaluate(self, num1: Option<&str>, num2: Option<&str>) -> Result<f64, CalcError> {
        let invalid = CalcError::InvalidInput(self.arity());
        let lhs = num1.and_then(parse_operand).ok_or(invalid)?;
        let rhs = || num2.and_then(parse_operand).ok_or(invalid);

        let result = match self {
            Self::Add          => lhs + rhs()?,
            Self::Subtract     => lhs - rhs()?,
            Self::Multiply     => lhs * rhs()?,
            Self::Exponentiate => lhs.powf(rhs()?),
            Self::Divide => {
                let rhs = rhs()?;
                if rhs == 0.0 {
                    return Err(DomainError::DivisionByZero.into());
                }
                lhs / rhs
            }
            // `%` on floats is the truncated remainder: the sign follows the
            // dividend, so -7 % 3 == -1.
            Self::Modulo => {
                let rhs = rhs()?;
                if rhs == 0.0 {
                    return Err(DomainError::ModuloByZero.into());
                }
                lhs % rhs
            }
            Self::Sqrt => {
                if lhs < 0.0 {
                    return Err(DomainError::NegativeSquareRoot.into());
                }
                lhs.sqrt()
            }
        };

        debug!(operation = self.name(), num1 = lhs, result, "evaluated");
        Ok(result)
    }
}

/// Reads a query value as a finite floating-point number.
///
/// Surrounding whitespace, Unicode included, is ignored; the rest must be a
/// complete decimal literal. `inf` and `NaN` parse as floats but are rejected here.
pub fn parse_operand(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Why an operation could not produce a result. Always a client error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// An operand was missing or not a finite number.
    #[error("Invalid input. {}", requirement(.0))]
    InvalidInput(Arity),

    /// The operands are numbers, but the operation is undefined for them.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

fn requirement(arity: &Arity) -> &'static str {
    match arity {
        Arity::Unary  => "num1 must be a number.",
        Arity::Binary => "Both num1 and num2 must be numbers.",
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Division by zero is not allowed.")]
    DivisionByZero,
    #[error("Modulo by zero is not allowed.")]
    ModuloByZero,
    #[error("Square root of a negative number is not supported.")]
    NegativeSquareRoot,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: Operation, num1: &str, num2: &str) -> Result<f64, CalcError> {
        op.evaluate(Some(num1), Some(num2))
    }

    #[test]
    fn binary_operations_compute() {
        assert_eq!(eval(Operation::Add, "1.5", "2.25"), Ok(3.75));
        assert_eq!(eval(Operation::Subtract, "10", "15"), Ok(-5.0));
        assert_eq!(eval(Operation::Multiply, "-3", "4"), Ok(-12.0));
        assert_eq!(eval(Operation::Divide, "7", "2"), Ok(3.5));
        assert_eq!(eval(Operation::Exponentiate, "2", "10"), Ok(1024.0));
        assert_eq!(eval(Operation::Modulo, "10", "3"), Ok(1.0));
    }

    #[test]
    fn add_matches_float_addition() {
        for (a, b) in [(0.1, 0.2), (-1e10, 3.5), (123.456, -0.001)] {
            let got = eval(Operation::Add, &a.to_string(), &b.to_string()).unwrap();
            assert!((got - (a + b)).abs() < 1e-9, "{a} + {b} gave {got}");
        }
    }

    #[test]
    fn modulo_sign_follows_dividend() {
        assert_eq!(eval(Operation::Modulo, "-7", "3"), Ok(-1.0));
        assert_eq!(eval(Operation::Modulo, "7", "-3"), Ok(1.0));
        assert_eq!(eval(Operation::Modulo, "5.5", "2"), Ok(1.5));
    }

    #[test]
    fn sqrt_ignores_num2() {
        assert_eq!(Operation::Sqrt.evaluate(Some("16"), None), Ok(4.0));
        assert_eq!(Operation::Sqrt.evaluate(Some("16"), Some("junk")), Ok(4.0));
        assert_eq!(Operation::Sqrt.evaluate(Some("0"), None), Ok(0.0));
    }

    #[test]
    fn zero_divisor_is_a_domain_error() {
        assert_eq!(
            eval(Operation::Divide, "10", "0"),
            Err(CalcError::Domain(DomainError::DivisionByZero)),
        );
        assert_eq!(
            eval(Operation::Divide, "10", "-0"),
            Err(CalcError::Domain(DomainError::DivisionByZero)),
        );
        assert_eq!(
            eval(Operation::Modulo, "10", "0.0"),
            Err(CalcError::Domain(DomainError::ModuloByZero)),
        );
    }

    #[test]
    fn negative_sqrt_is_a_domain_error() {
        assert_eq!(
            Operation::Sqrt.evaluate(Some("-4"), None),
            Err(CalcError::Domain(DomainError::NegativeSquareRoot)),
        );
    }

    #[test]
    fn invalid_operands_are_rejected_per_arity() {
        for op in Operation::ALL {
            let expected = Err(CalcError::InvalidInput(op.arity()));
            assert_eq!(op.evaluate(Some("abc"), Some("1")), expected, "{op:?}");
            assert_eq!(op.evaluate(None, Some("1")), expected, "{op:?}");
            if op.arity() == Arity::Binary {
                assert_eq!(op.evaluate(Some("1"), Some("abc")), expected, "{op:?}");
                assert_eq!(op.evaluate(Some("1"), None), expected, "{op:?}");
            }
        }
    }

    #[test]
    fn invalid_input_takes_precedence_over_domain_checks() {
        assert_eq!(
            eval(Operation::Divide, "x", "0"),
            Err(CalcError::InvalidInput(Arity::Binary)),
        );
    }

    #[test]
    fn parse_operand_accepts_finite_literals_only() {
        assert_eq!(parse_operand("3"), Some(3.0));
        assert_eq!(parse_operand(" -2.5 "), Some(-2.5));
        assert_eq!(parse_operand("1e3"), Some(1000.0));
        assert_eq!(parse_operand(".5"), Some(0.5));
        assert_eq!(parse_operand("\u{a0}3\u{2003}"), Some(3.0));

        for bad in ["", "   ", "abc", "12abc", "inf", "-infinity", "NaN", "1e400"] {
            assert_eq!(parse_operand(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CalcError::InvalidInput(Arity::Binary).to_string(),
            "Invalid input. Both num1 and num2 must be numbers.",
        );
        assert_eq!(
            CalcError::InvalidInput(Arity::Unary).to_string(),
            "Invalid input. num1 must be a number.",
        );
        assert_eq!(
            CalcError::from(DomainError::DivisionByZero).to_string(),
            "Division by zero is not allowed.",
        );
    }

    #[test]
    fn paths_are_distinct() {
        let mut paths: Vec<_> = Operation::ALL.iter().map(|op| op.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Operation::ALL.len());
    }
}
