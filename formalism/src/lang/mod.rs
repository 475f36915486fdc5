//! The term/atom/expression sub-language: everything below the level of a
//! full action, axiom or rule.

mod atom;
mod condition;
mod effect;
mod expression;
mod term;

pub use atom::{Atom, FunctionTerm, GroundAtom, GroundFunctionTerm, GroundFunctionValue, GroundLiteral, Literal};
pub use condition::ConjunctiveCondition;
pub use effect::{ConditionalEffect, ConjunctiveEffect, NumericEffect, NumericEffectKind};
pub use expression::{
    ArithmeticOpKind, BinaryOperator, BooleanOpKind, BooleanOperator, FunctionExpression, GroundFunctionExpression,
    MultiOperator, UnaryOperator, UnaryOpKind,
};
pub use term::{Function, Object, Predicate, Term, Variable};
