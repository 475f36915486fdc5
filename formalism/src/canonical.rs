//! Per-entity canonical-form rules (spec §4.1's canonicality invariant).
//!
//! Grounded on `tyr/formalism/canonicalization.hpp` and
//! `tyr/common/canonicalization.hpp`: most entities are trivially canonical
//! (their constructor can't produce a non-canonical value in the first
//! place); the only real work is sorting the argument lists of commutative
//! operators (`+`, `*`) and the bodies of rules, so that two structurally
//! equivalent but differently-ordered descriptions intern to the same id.

use crate::ids::*;

pub trait Canonicalize {
    fn is_canonical(&self) -> bool;
    fn canonicalize(&mut self);
}

/// Implements [`Canonicalize`] as a no-op: the type has no degrees of
/// freedom left to normalise once constructed.
macro_rules! trivially_canonical {
    ($name:ty) => {
        impl Canonicalize for $name {
            fn is_canonical(&self) -> bool {
                true
            }
            fn canonicalize(&mut self) {}
        }
    };
}

fn is_sorted<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0] <= w[1])
}

fn sort<T: Ord>(items: &mut Vec<T>) {
    if !is_sorted(items) {
        items.sort();
    }
}

// --- lang-level entities -----------------------------------------------

trivially_canonical!(crate::lang::Variable);
trivially_canonical!(crate::lang::Object);
trivially_canonical!(crate::lang::Term);
trivially_canonical!(crate::lang::Predicate);
trivially_canonical!(crate::lang::Function);
trivially_canonical!(crate::lang::Atom);
trivially_canonical!(crate::lang::GroundAtom);
trivially_canonical!(crate::lang::Literal);
trivially_canonical!(crate::lang::GroundLiteral);
trivially_canonical!(crate::lang::FunctionTerm);
trivially_canonical!(crate::lang::GroundFunctionTerm);
trivially_canonical!(crate::lang::GroundFunctionValue);
trivially_canonical!(crate::lang::UnaryOperator);
trivially_canonical!(crate::lang::BooleanOperator);
trivially_canonical!(crate::lang::FunctionExpression);
trivially_canonical!(crate::lang::GroundFunctionExpression);

impl Canonicalize for crate::lang::BinaryOperator {
    fn is_canonical(&self) -> bool {
        use crate::lang::ArithmeticOpKind::*;
        match self.op {
            Add | Mul => self.lhs <= self.rhs,
            Sub | Div => true,
        }
    }

    fn canonicalize(&mut self) {
        use crate::lang::ArithmeticOpKind::*;
        if matches!(self.op, Add | Mul) && self.lhs > self.rhs {
            std::mem::swap(&mut self.lhs, &mut self.rhs);
        }
    }
}

impl Canonicalize for crate::lang::MultiOperator {
    fn is_canonical(&self) -> bool {
        is_sorted(&self.args)
    }

    fn canonicalize(&mut self) {
        sort(&mut self.args);
    }
}

impl Canonicalize for crate::lang::ConjunctiveCondition {
    fn is_canonical(&self) -> bool {
        is_sorted(&self.static_literals)
            && is_sorted(&self.fluent_literals)
            && is_sorted(&self.derived_literals)
            && is_sorted(&self.numeric_constraints)
    }

    fn canonicalize(&mut self) {
        sort(&mut self.static_literals);
        sort(&mut self.fluent_literals);
        sort(&mut self.derived_literals);
        sort(&mut self.numeric_constraints);
    }
}

impl Canonicalize for crate::lang::ConjunctiveEffect {
    fn is_canonical(&self) -> bool {
        is_sorted(&self.literals)
    }

    fn canonicalize(&mut self) {
        sort(&mut self.literals);
    }
}

trivially_canonical!(crate::lang::ConditionalEffect);

// `new_id_type!` already derives `Ord`/`PartialOrd` (by wrapped `u32`), which
// is exactly the "some fixed but arbitrary total order" canonicalization
// needs for sorting operator arguments and rule bodies.

// --- planning-level entities --------------------------------------------

trivially_canonical!(crate::planning::Action);
trivially_canonical!(crate::planning::Axiom);
trivially_canonical!(crate::planning::GroundAction);
trivially_canonical!(crate::planning::GroundAxiom);
trivially_canonical!(crate::planning::Metric);

impl Canonicalize for crate::planning::Rule {
    fn is_canonical(&self) -> bool {
        is_sorted(&self.static_body) && is_sorted(&self.fluent_body) && is_sorted(&self.derived_body) && is_sorted(&self.numeric_body)
    }

    fn canonicalize(&mut self) {
        sort(&mut self.static_body);
        sort(&mut self.fluent_body);
        sort(&mut self.derived_body);
        sort(&mut self.numeric_body);
    }
}

impl Canonicalize for crate::planning::GroundRule {
    fn is_canonical(&self) -> bool {
        is_sorted(&self.static_body) && is_sorted(&self.fluent_body) && is_sorted(&self.derived_body) && is_sorted(&self.numeric_body)
    }

    fn canonicalize(&mut self) {
        sort(&mut self.static_body);
        sort(&mut self.fluent_body);
        sort(&mut self.derived_body);
        sort(&mut self.numeric_body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ArithmeticOpKind, BinaryOperator};

    #[test]
    fn commutative_binary_operator_orders_operands() {
        let mut add = BinaryOperator {
            op: ArithmeticOpKind::Add,
            lhs: FunctionExpressionId::new(5),
            rhs: FunctionExpressionId::new(1),
        };
        assert!(!add.is_canonical());
        add.canonicalize();
        assert!(add.is_canonical());
        assert_eq!(add.lhs, FunctionExpressionId::new(1));
        assert_eq!(add.rhs, FunctionExpressionId::new(5));
    }

    #[test]
    fn non_commutative_binary_operator_keeps_operand_order() {
        let mut sub = BinaryOperator {
            op: ArithmeticOpKind::Sub,
            lhs: FunctionExpressionId::new(5),
            rhs: FunctionExpressionId::new(1),
        };
        assert!(sub.is_canonical());
        sub.canonicalize();
        assert_eq!(sub.lhs, FunctionExpressionId::new(5));
    }
}
