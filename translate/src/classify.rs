//! The one-pass predicate/function classification spec §4.2 (and its
//! expansion in SPEC_FULL §12) calls for: fluent iff it's rewritten by some
//! effect, derived iff it's an axiom head, static otherwise — with
//! `total-cost` always reserved as the one auxiliary function, matching the
//! original `tyr` preparation pass's special-casing of the action-costs
//! bookkeeping function.

use hashbrown::HashMap;

use formalism::EntityKind;

use crate::error::{KindMismatch, TranslationError};
use crate::raw::RawDomain;

pub struct Classification {
    pub predicates: HashMap<String, EntityKind>,
    pub functions: HashMap<String, EntityKind>,
}

pub fn classify<D: RawDomain>(domain: &D) -> Result<Classification, TranslationError> {
    let mut predicates: HashMap<String, EntityKind> =
        domain.predicate_signatures().into_iter().map(|(name, _)| (name, EntityKind::Static)).collect();
    let mut functions: HashMap<String, EntityKind> =
        domain.function_signatures().into_iter().map(|(name, _)| (name, EntityKind::Static)).collect();

    for axiom in domain.axioms() {
        let (head_name, _) = axiom.head();
        upgrade(&mut predicates, head_name, EntityKind::Derived)?;
    }

    for action in domain.actions() {
        for effect in action.effects() {
            for literal in &effect.add {
                upgrade(&mut predicates, &literal.predicate, EntityKind::Fluent)?;
            }
            for numeric in &effect.numeric {
                upgrade(&mut functions, &numeric.target.0, EntityKind::Fluent)?;
            }
        }
    }

    if let Some(kind) = functions.get_mut("total-cost") {
        *kind = EntityKind::Auxiliary;
    }

    Ok(Classification { predicates, functions })
}

/// Moves `name`'s classification from the default `Static` to `kind`,
/// erroring if it had already been pinned to a different, incompatible
/// kind (e.g. an axiom head also appearing as an action effect's target).
fn upgrade(map: &mut HashMap<String, EntityKind>, name: &str, kind: EntityKind) -> Result<(), TranslationError> {
    match map.get(name).copied() {
        None => {
            map.insert(name.to_string(), kind);
            Ok(())
        }
        Some(existing) if existing == kind || existing == EntityKind::Static => {
            map.insert(name.to_string(), kind);
            Ok(())
        }
        Some(existing) => {
            Err(KindMismatch { name: name.to_string(), classified: existing, used_as: kind, span: None }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawAction, RawAxiom, RawCondition, RawConditionalEffect, RawLiteral};

    struct Action {
        name: String,
        parameters: Vec<String>,
        precondition: RawCondition,
        effects: Vec<RawConditionalEffect>,
    }
    impl RawAction for Action {
        fn name(&self) -> &str {
            &self.name
        }
        fn parameters(&self) -> &[String] {
            &self.parameters
        }
        fn precondition(&self) -> &RawCondition {
            &self.precondition
        }
        fn effects(&self) -> &[RawConditionalEffect] {
            &self.effects
        }
    }

    struct Axiom {
        parameters: Vec<String>,
        body: RawCondition,
        head: (String, Vec<String>),
    }
    impl RawAxiom for Axiom {
        fn parameters(&self) -> &[String] {
            &self.parameters
        }
        fn body(&self) -> &RawCondition {
            &self.body
        }
        fn head(&self) -> (&str, &[String]) {
            (&self.head.0, &self.head.1)
        }
    }

    struct Domain {
        predicates: Vec<(String, u32)>,
        functions: Vec<(String, u32)>,
        constants: Vec<String>,
        actions: Vec<Action>,
        axioms: Vec<Axiom>,
    }
    impl RawDomain for Domain {
        type Action = Action;
        type Axiom = Axiom;
        fn name(&self) -> &str {
            "test"
        }
        fn predicate_signatures(&self) -> Vec<(String, u32)> {
            self.predicates.clone()
        }
        fn function_signatures(&self) -> Vec<(String, u32)> {
            self.functions.clone()
        }
        fn constants(&self) -> &[String] {
            &self.constants
        }
        fn actions(&self) -> &[Action] {
            &self.actions
        }
        fn axioms(&self) -> &[Axiom] {
            &self.axioms
        }
    }

    #[test]
    fn unreferenced_predicate_defaults_to_static() {
        let domain = Domain {
            predicates: vec![("on-table".into(), 1)],
            functions: vec![],
            constants: vec![],
            actions: vec![],
            axioms: vec![],
        };
        let classification = classify(&domain).unwrap();
        assert_eq!(classification.predicates["on-table"], EntityKind::Static);
    }

    #[test]
    fn effect_head_predicate_is_fluent() {
        let domain = Domain {
            predicates: vec![("holding".into(), 1)],
            functions: vec![],
            constants: vec![],
            actions: vec![Action {
                name: "pick-up".into(),
                parameters: vec!["?x".into()],
                precondition: RawCondition::default(),
                effects: vec![RawConditionalEffect {
                    add: vec![RawLiteral { predicate: "holding".into(), args: vec![], positive: true }],
                    ..Default::default()
                }],
            }],
            axioms: vec![],
        };
        let classification = classify(&domain).unwrap();
        assert_eq!(classification.predicates["holding"], EntityKind::Fluent);
    }

    #[test]
    fn axiom_head_is_derived() {
        let domain = Domain {
            predicates: vec![("above".into(), 2)],
            functions: vec![],
            constants: vec![],
            actions: vec![],
            axioms: vec![Axiom {
                parameters: vec!["?x".into(), "?y".into()],
                body: RawCondition::default(),
                head: ("above".into(), vec!["?x".into(), "?y".into()]),
            }],
        };
        let classification = classify(&domain).unwrap();
        assert_eq!(classification.predicates["above"], EntityKind::Derived);
    }

    #[test]
    fn total_cost_is_always_auxiliary() {
        let domain = Domain {
            predicates: vec![],
            functions: vec![("total-cost".into(), 0)],
            constants: vec![],
            actions: vec![Action {
                name: "noop".into(),
                parameters: vec![],
                precondition: RawCondition::default(),
                effects: vec![RawConditionalEffect {
                    numeric: vec![crate::raw::RawNumericEffect {
                        kind: crate::raw::RawNumericEffectKind::Increase,
                        target: ("total-cost".into(), vec![]),
                        value: crate::raw::RawExpr::Number(1),
                    }],
                    ..Default::default()
                }],
            }],
            axioms: vec![],
        };
        let classification = classify(&domain).unwrap();
        assert_eq!(classification.functions["total-cost"], EntityKind::Auxiliary);
    }

    #[test]
    fn derived_predicate_used_as_effect_head_is_a_kind_mismatch() {
        let domain = Domain {
            predicates: vec![("above".into(), 2)],
            functions: vec![],
            constants: vec![],
            actions: vec![Action {
                name: "bad".into(),
                parameters: vec![],
                precondition: RawCondition::default(),
                effects: vec![RawConditionalEffect {
                    add: vec![RawLiteral { predicate: "above".into(), args: vec![], positive: true }],
                    ..Default::default()
                }],
            }],
            axioms: vec![Axiom {
                parameters: vec!["?x".into(), "?y".into()],
                body: RawCondition::default(),
                head: ("above".into(), vec!["?x".into(), "?y".into()]),
            }],
        };
        assert!(matches!(classify(&domain), Err(TranslationError::KindMismatch(_))));
    }
}
