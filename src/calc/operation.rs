//! Operation catalogue and evaluation

use super::operand::QueryParams;
use crate::error::CalcError;

const MSG_NUMBERS: &str = "Invalid input. Please provide valid numbers.";
const MSG_POWER: &str = "Invalid input. Base and exponent must be numbers.";
const MSG_SQRT: &str = "Invalid input. Number must be a non-negative number.";
const MSG_MODULO: &str =
    "Invalid input. Dividend and divisor must be numbers, and divisor must not be zero.";

/// Arithmetic operation exposed as a GET endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Two operands
    Binary(BinaryOp),
    /// Square root of `num1`
    Sqrt,
}

/// Operations taking two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
    Modulo,
}

impl Operation {
    pub const ALL: [Self; 7] = [
        Self::Binary(BinaryOp::Add),
        Self::Binary(BinaryOp::Subtract),
        Self::Binary(BinaryOp::Multiply),
        Self::Binary(BinaryOp::Divide),
        Self::Binary(BinaryOp::Exponentiate),
        Self::Sqrt,
        Self::Binary(BinaryOp::Modulo),
    ];

    /// Resolve an endpoint path to its operation
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.path() == path)
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Binary(BinaryOp::Add) => "/add",
            Self::Binary(BinaryOp::Subtract) => "/subtract",
            Self::Binary(BinaryOp::Multiply) => "/multiply",
            Self::Binary(BinaryOp::Divide) => "/divide",
            Self::Binary(BinaryOp::Exponentiate) => "/exponentiate",
            Self::Binary(BinaryOp::Modulo) => "/modulo",
            Self::Sqrt => "/sqrt",
        }
    }

    /// Message logged after a successful evaluation
    pub const fn completed_message(self) -> &'static str {
        match self {
            Self::Binary(BinaryOp::Add) => "Addition operation completed",
            Self::Binary(BinaryOp::Subtract) => "Subtraction operation completed",
            Self::Binary(BinaryOp::Multiply) => "Multiplication operation completed",
            Self::Binary(BinaryOp::Divide) => "Division operation completed",
            Self::Binary(BinaryOp::Exponentiate) => "Exponentiation operation completed",
            Self::Binary(BinaryOp::Modulo) => "Modulo operation completed",
            Self::Sqrt => "Square root operation completed",
        }
    }

    /// Read operands from the query and compute the result
    pub fn evaluate(self, params: &QueryParams) -> Result<f64, CalcError> {
        match self {
            Self::Sqrt => params
                .operand("num1")
                .filter(|a| *a >= 0.0)
                .map(f64::sqrt)
                .ok_or(CalcError::InvalidInput(MSG_SQRT)),
            Self::Binary(op) => {
                let (first, second) = op.params();
                let a = params.operand(first).ok_or_else(|| op.invalid_input())?;
                let b = params.operand(second).ok_or_else(|| op.invalid_input())?;
                op.apply(a, b)
            }
        }
    }
}

impl BinaryOp {
    /// Query parameter names of the two operands
    pub const fn params(self) -> (&'static str, &'static str) {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide => ("num1", "num2"),
            Self::Exponentiate => ("base", "exponent"),
            Self::Modulo => ("dividend", "divisor"),
        }
    }

    const fn invalid_input(self) -> CalcError {
        CalcError::InvalidInput(match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide => MSG_NUMBERS,
            Self::Exponentiate => MSG_POWER,
            Self::Modulo => MSG_MODULO,
        })
    }

    /// Apply the operation to already parsed operands
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(a / b),
            Self::Exponentiate => Ok(a.powf(b)),
            // Zero divisor is rejected even though `%` would yield NaN
            Self::Modulo if b == 0.0 => Err(self.invalid_input()),
            Self::Modulo => Ok(a % b),
        }
    }
}
