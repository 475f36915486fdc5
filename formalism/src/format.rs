//! Human-readable rendering of interned entities.
//!
//! Grounded on `tyr::formalism`'s `formatter.hpp`: the original pairs every
//! `Data<T>`/`View<T>` with a `print`/`operator<<` overload that resolves
//! names through the owning repository as it writes. A plain `Display` impl
//! can't do that here — an `AtomId` means nothing without the `Repository`
//! it was interned in — so each entity gets a small `Display*` wrapper
//! borrowing both the id and the repository, the same shape
//! `Repository::object_name`/`predicate_name` already use for single names.

use std::fmt;

use crate::ids::{AtomId, GroundAtomId, GroundLiteralId, LiteralId, RuleId, TermId, VariableId};
use crate::lang::Term;
use crate::repository::Repository;

pub struct DisplayTerm<'a>(pub &'a Repository, pub TermId);

impl fmt::Display for DisplayTerm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.terms.get(self.1) {
            Term::Object(object) => write!(f, "{}", self.0.object_name(*object)),
            Term::Variable(variable) => write!(f, "?{}", variable.to_u32()),
        }
    }
}

pub struct DisplayVariable(pub VariableId);

impl fmt::Display for DisplayVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0.to_u32())
    }
}

pub struct DisplayAtom<'a>(pub &'a Repository, pub AtomId);

impl fmt::Display for DisplayAtom<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let atom = self.0.get_atom(self.1);
        write!(f, "({}", self.0.predicate_name(atom.predicate))?;
        for &term in &atom.terms {
            write!(f, " {}", DisplayTerm(self.0, term))?;
        }
        write!(f, ")")
    }
}

pub struct DisplayGroundAtom<'a>(pub &'a Repository, pub GroundAtomId);

impl fmt::Display for DisplayGroundAtom<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let atom = self.0.get_ground_atom(self.1);
        write!(f, "({}", self.0.predicate_name(atom.predicate))?;
        for &object in &atom.objects {
            write!(f, " {}", self.0.object_name(object))?;
        }
        write!(f, ")")
    }
}

pub struct DisplayLiteral<'a>(pub &'a Repository, pub LiteralId);

impl fmt::Display for DisplayLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literal = self.0.literals.get(self.1);
        if literal.polarity {
            write!(f, "{}", DisplayAtom(self.0, literal.atom))
        } else {
            write!(f, "(not {})", DisplayAtom(self.0, literal.atom))
        }
    }
}

pub struct DisplayGroundLiteral<'a>(pub &'a Repository, pub GroundLiteralId);

impl fmt::Display for DisplayGroundLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literal = self.0.ground_literals.get(self.1);
        if literal.polarity {
            write!(f, "{}", DisplayGroundAtom(self.0, literal.atom))
        } else {
            write!(f, "(not {})", DisplayGroundAtom(self.0, literal.atom))
        }
    }
}

/// `head :- static-body, fluent-body, derived-body, numeric-body`, the same
/// layout `formatter.hpp`'s `Data<Rule>` overload prints, minus the
/// numeric-body rendering (no expression formatter exists on this side yet;
/// a rule with a non-empty `numeric_body` prints its arity instead).
pub struct DisplayRule<'a>(pub &'a Repository, pub RuleId);

impl fmt::Display for DisplayRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.0.rules.get(self.1);
        write!(f, "{} :- ", DisplayAtom(self.0, rule.head))?;
        let mut first = true;
        for &lit in rule.static_body.iter().chain(&rule.fluent_body).chain(&rule.derived_body) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", DisplayLiteral(self.0, lit))?;
            first = false;
        }
        if !rule.numeric_body.is_empty() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "<{} numeric constraint(s)>", rule.numeric_body.len())?;
        }
        Ok(())
    }
}
