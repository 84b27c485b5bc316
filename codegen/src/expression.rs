use config_schema::Lambda;
use serde::Serialize;

use crate::types::CppType;

/// A C++ expression used as a call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Expression {
    Int(i64),
    /// Integer rendered in hexadecimal, used for addresses.
    HexInt(u32),
    Bool(bool),
    /// Brace initializer, e.g. `{0, 14, 31}`.
    Array(Vec<Expression>),
    Lambda(LambdaExpression),
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Expression {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u8> for Expression {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<LambdaExpression> for Expression {
    fn from(value: LambdaExpression) -> Self {
        Self::Lambda(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub ty: CppType,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: CppType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

/// A user lambda bound to a fixed signature.
///
/// The body is carried through as-is; the firmware compiler checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LambdaExpression {
    pub parameters: Vec<Parameter>,
    pub return_type: CppType,
    pub capture: String,
    pub body: String,
}

/// Bind a lambda's source to the parameters and return type its caller expects.
pub fn process_lambda(
    lambda: &Lambda,
    parameters: Vec<Parameter>,
    return_type: CppType,
) -> LambdaExpression {
    LambdaExpression {
        parameters,
        return_type,
        capture: "=".to_string(),
        body: lambda.source().to_string(),
    }
}
