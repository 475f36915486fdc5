use crate::ids::{FunctionExpressionId, FunctionTermId, GroundFunctionExpressionId, GroundFunctionTermId};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOpKind {
    Neg,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithmeticOpKind {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum BooleanOpKind {
    Eq,
    Neq,
    Leq,
    Lt,
    Geq,
    Gt,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UnaryOperator {
    pub op: UnaryOpKind,
    pub arg: FunctionExpressionId,
}

/// `lhs op rhs`. For the commutative kinds (`Add`, `Mul`) canonicalization
/// orders the operands so `(+ a b)` and `(+ b a)` intern identically.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BinaryOperator {
    pub op: ArithmeticOpKind,
    pub lhs: FunctionExpressionId,
    pub rhs: FunctionExpressionId,
}

/// An n-ary commutative accumulation, e.g. `(+ a b c)`. Only `Add`/`Mul` are
/// ever constructed this way; a binary `Sub`/`Div` stays a [`BinaryOperator`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MultiOperator {
    pub op: ArithmeticOpKind,
    pub args: Vec<FunctionExpressionId>,
}

/// A numeric constraint comparing two expressions, e.g. `(>= (fuel ?t) 5)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BooleanOperator {
    pub op: BooleanOpKind,
    pub lhs: FunctionExpressionId,
    pub rhs: FunctionExpressionId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionExpression {
    Constant(i64),
    FunctionTerm(FunctionTermId),
    Unary(crate::ids::UnaryOperatorId),
    Binary(crate::ids::BinaryOperatorId),
    Multi(crate::ids::MultiOperatorId),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum GroundFunctionExpression {
    Constant(i64),
    FunctionTerm(GroundFunctionTermId),
    Unary(UnaryOpKind, GroundFunctionExpressionId),
    Binary(ArithmeticOpKind, GroundFunctionExpressionId, GroundFunctionExpressionId),
    Multi(ArithmeticOpKind, Vec<GroundFunctionExpressionId>),
}
