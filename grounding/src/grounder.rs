//! Binding substitution (spec §4.5): turns a rule parameter binding into
//! fully-ground entities, canonicalising and interning each sub-entity
//! bottom-up exactly the way [`translate::build::Builder`] interns lifted
//! entities top-down. Newly interned ground atoms are what feeds the next
//! round's delta in [`crate::task_builder::GroundTaskBuilder`].

use formalism::{
    ActionId, AxiomId, FunctionExpression, GroundAction, GroundAxiom, GroundConditionalEffect, GroundFunctionExpression,
    GroundFunctionExpressionId, GroundFunctionTerm, GroundLiteralId, GroundNumericConstraint, GroundNumericEffect,
    GroundRule, ObjectId, Repository, Rule, RuleId, Term,
};

pub struct Grounder<'a> {
    repo: &'a mut Repository,
}

impl<'a> Grounder<'a> {
    pub fn new(repo: &'a mut Repository) -> Self {
        Grounder { repo }
    }

    pub fn repo_mut(&mut self) -> &mut Repository {
        self.repo
    }

    fn resolve_object(&self, term: formalism::TermId, binding: &[ObjectId]) -> ObjectId {
        match self.repo.terms.get(term) {
            Term::Object(o) => *o,
            Term::Variable(v) => binding[v.to_usize()],
        }
    }

    fn ground_literal(&mut self, literal: formalism::LiteralId, binding: &[ObjectId]) -> GroundLiteralId {
        let lit = self.repo.literals.get(literal).clone();
        let atom = self.repo.get_atom(lit.atom).clone();
        let objects: Vec<ObjectId> = atom.terms.iter().map(|&t| self.resolve_object(t, binding)).collect();
        let ground_atom = self.repo.intern_ground_atom(atom.predicate, objects);
        self.repo.intern_ground_literal(ground_atom, lit.polarity)
    }

    fn ground_function_expr(&mut self, expr: formalism::FunctionExpressionId, binding: &[ObjectId]) -> GroundFunctionExpressionId {
        let expr = self.repo.function_expressions.get(expr).clone();
        let ground = match expr {
            FunctionExpression::Constant(c) => GroundFunctionExpression::Constant(c),
            FunctionExpression::FunctionTerm(id) => {
                let term = self.repo.function_terms.get(id).clone();
                let objects: Vec<ObjectId> = term.terms.iter().map(|&t| self.resolve_object(t, binding)).collect();
                let ground_term = self.repo.ground_function_terms.get_or_create(GroundFunctionTerm {
                    function: term.function,
                    objects,
                    kind: term.kind,
                }).0;
                GroundFunctionExpression::FunctionTerm(ground_term)
            }
            FunctionExpression::Unary(id) => {
                let op = self.repo.unary_operators.get(id).clone();
                let arg = self.ground_function_expr(op.arg, binding);
                GroundFunctionExpression::Unary(op.op, arg)
            }
            FunctionExpression::Binary(id) => {
                let op = self.repo.binary_operators.get(id).clone();
                let lhs = self.ground_function_expr(op.lhs, binding);
                let rhs = self.ground_function_expr(op.rhs, binding);
                GroundFunctionExpression::Binary(op.op, lhs, rhs)
            }
            FunctionExpression::Multi(id) => {
                let op = self.repo.multi_operators.get(id).clone();
                let args: Vec<GroundFunctionExpressionId> = op.args.iter().map(|&a| self.ground_function_expr(a, binding)).collect();
                GroundFunctionExpression::Multi(op.op, args)
            }
        };
        self.repo.ground_function_expressions.get_or_create(ground).0
    }

    fn ground_numeric_constraint(&mut self, constraint: formalism::BooleanOperatorId, binding: &[ObjectId]) -> GroundNumericConstraint {
        let c = self.repo.boolean_operators.get(constraint).clone();
        GroundNumericConstraint {
            op: c.op,
            lhs: self.ground_function_expr(c.lhs, binding),
            rhs: self.ground_function_expr(c.rhs, binding),
        }
    }

    /// Grounds `rule` under `binding` (one object per rule parameter) into
    /// a `GroundRule`, interning every body literal and numeric constraint.
    pub fn ground_rule(&mut self, rule_id: RuleId, binding: &[ObjectId]) -> GroundRule {
        let rule: Rule = self.repo.rules.get(rule_id).clone();
        let static_body = rule.static_body.iter().map(|&l| self.ground_literal(l, binding)).collect();
        let fluent_body = rule.fluent_body.iter().map(|&l| self.ground_literal(l, binding)).collect();
        let derived_body = rule.derived_body.iter().map(|&l| self.ground_literal(l, binding)).collect();
        let numeric_body = rule.numeric_body.iter().map(|&c| self.ground_numeric_constraint(c, binding)).collect();
        let head_atom = self.repo.get_atom(rule.head).clone();
        let head_objects: Vec<ObjectId> = head_atom.terms.iter().map(|&t| self.resolve_object(t, binding)).collect();
        let head = self.repo.intern_ground_atom(head_atom.predicate, head_objects);
        GroundRule { rule: rule_id, objects: binding.to_vec(), static_body, fluent_body, derived_body, numeric_body, head }
    }

    /// Grounds one `forall` binding of a conditional effect: the `guard`
    /// literals are interned, not evaluated here — whether they hold is a
    /// property of a particular state, checked by the applier at execution
    /// time, not at grounding time.
    fn ground_conditional_effect(
        &mut self,
        effect_id: formalism::ConditionalEffectId,
        action_binding: &[ObjectId],
        quantified: &[ObjectId],
    ) -> GroundConditionalEffect {
        let effect = self.repo.conditional_effects.get(effect_id).clone();
        let mut full_binding = action_binding.to_vec();
        full_binding.extend_from_slice(quantified);

        let guard: Vec<GroundLiteralId> = effect.guard.iter().map(|&l| self.ground_literal(l, &full_binding)).collect();

        let body = self.repo.conjunctive_effects.get(effect.effect).clone();
        let mut add = Vec::new();
        let mut delete = Vec::new();
        for &lit in &body.literals {
            let lit = self.repo.literals.get(lit).clone();
            let atom = self.repo.get_atom(lit.atom).clone();
            let objects: Vec<ObjectId> = atom.terms.iter().map(|&t| self.resolve_object(t, &full_binding)).collect();
            let ground_atom = self.repo.intern_ground_atom(atom.predicate, objects);
            if lit.polarity {
                add.push(ground_atom);
            } else {
                delete.push(ground_atom);
            }
        }

        let numeric_effects = body
            .numeric_effects
            .iter()
            .map(|ne| {
                let term = self.repo.function_terms.get(ne.target).clone();
                let target_objects: Vec<ObjectId> = term.terms.iter().map(|&t| self.resolve_object(t, &full_binding)).collect();
                let target = self.repo.ground_function_terms.get_or_create(GroundFunctionTerm {
                    function: term.function,
                    objects: target_objects,
                    kind: term.kind,
                }).0;
                let value = self.ground_function_expr(ne.value, &full_binding);
                GroundNumericEffect { kind: ne.kind, target, value }
            })
            .collect();

        GroundConditionalEffect { guard, add, delete, numeric_effects }
    }

    /// Grounds an action schema under `binding`, expanding every `forall`
    /// parameter list of its conditional effects over `objects` (the task's
    /// full object universe — spec's quantified effects range over every
    /// object of the matching type, simplified here to the whole universe
    /// since the formalism has no declared type hierarchy to narrow it).
    pub fn ground_action(&mut self, action_id: ActionId, ground_rule_id: formalism::GroundRuleId, binding: &[ObjectId], objects: &[ObjectId]) -> GroundAction {
        let action = self.repo.actions.get(action_id).clone();
        let mut effects = Vec::new();
        for &effect_id in &action.effects {
            let effect = self.repo.conditional_effects.get(effect_id).clone();
            if effect.parameters.is_empty() {
                effects.push(self.ground_conditional_effect(effect_id, binding, &[]));
                continue;
            }
            for quantified in cartesian_power(objects, effect.parameters.len()) {
                effects.push(self.ground_conditional_effect(effect_id, binding, &quantified));
            }
        }
        GroundAction { action: action_id, ground_rule: ground_rule_id, effects }
    }

    pub fn ground_axiom(&mut self, axiom_id: AxiomId, ground_rule_id: formalism::GroundRuleId) -> GroundAxiom {
        GroundAxiom { axiom: axiom_id, ground_rule: ground_rule_id }
    }

    /// Interns `rule`'s `GroundRule`, returning its id (deduplicated: the
    /// same binding grounded twice yields the same `GroundRuleId`).
    pub fn intern_ground_rule(&mut self, ground_rule: GroundRule) -> formalism::GroundRuleId {
        self.repo.ground_rules.get_or_create(ground_rule).0
    }
}

fn cartesian_power(objects: &[ObjectId], n: usize) -> Vec<Vec<ObjectId>> {
    let mut result = vec![Vec::new()];
    for _ in 0..n {
        let mut next = Vec::with_capacity(result.len() * objects.len());
        for prefix in &result {
            for &o in objects {
                let mut p = prefix.clone();
                p.push(o);
                next.push(p);
            }
        }
        result = next;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use formalism::EntityKind;

    #[test]
    fn grounding_a_unary_static_rule_substitutes_the_binding() {
        let mut repo = Repository::new();
        let p = repo.intern_predicate("connected", 1, EntityKind::Static);
        let a = repo.intern_object("a");
        let v0 = formalism::VariableId::new(0);
        let tv0 = repo.intern_term_variable(v0);
        let atom = repo.intern_atom(p, vec![tv0]);
        let literal = repo.intern_literal(atom, true);
        let rule = repo
            .rules
            .get_or_create(Rule {
                parameters: vec![v0],
                static_body: vec![literal],
                fluent_body: vec![],
                derived_body: vec![],
                numeric_body: vec![],
                head: atom,
            })
            .0;

        let mut grounder = Grounder::new(&mut repo);
        let ground_rule = grounder.ground_rule(rule, &[a]);
        assert_eq!(ground_rule.objects, vec![a]);
        assert_eq!(ground_rule.static_body.len(), 1);

        let ground_literal = repo.ground_literals.get(ground_rule.static_body[0]);
        let ground_atom = repo.get_ground_atom(ground_literal.atom);
        assert_eq!(ground_atom.objects, vec![a]);
    }
}
