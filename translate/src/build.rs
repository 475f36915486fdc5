//! Bottom-up translation from a [`RawDomain`]/[`RawProblem`] tree into a
//! [`formalism::Repository`], using a stack-scoped parameter-name →
//! position mapping popped on scope exit, exactly as SPEC_FULL §12
//! describes.

use formalism::{
    Action, ArithmeticOpKind, Axiom, BinaryOperator, BooleanOpKind, BooleanOperator, ConditionalEffect,
    ConjunctiveCondition, ConjunctiveEffect, EntityKind, FunctionExpression, FunctionTerm, GroundFunctionValue,
    Literal, MultiOperator, NumericEffect, NumericEffectKind, Repository, Rule, UnaryOpKind, UnaryOperator,
};
use formalism::{ActionId, AxiomId, FunctionExpressionId, MetricId, RuleId, TermId, VariableId};

use crate::classify::{classify, Classification};
use crate::error::TranslationError;
use crate::raw::{
    RawAction, RawArithOp, RawAxiom, RawCompareOp, RawCondition, RawConditionalEffect, RawConstraint, RawDomain,
    RawExpr, RawLiteral, RawMetricObjective, RawNumericEffectKind, RawProblem, RawTerm,
};

/// A stack-scoped name → position mapping, popped on scope exit.
#[derive(Default, Clone)]
struct Scope {
    bindings: Vec<(String, VariableId)>,
}

impl Scope {
    fn push_parameters(names: &[String]) -> Self {
        let bindings = names.iter().enumerate().map(|(i, n)| (n.clone(), VariableId::new(i as u32))).collect();
        Scope { bindings }
    }

    fn extend(&self, extra_names: &[String]) -> Self {
        let mut bindings = self.bindings.clone();
        let base = bindings.len() as u32;
        for (i, name) in extra_names.iter().enumerate() {
            bindings.push((name.clone(), VariableId::new(base + i as u32)));
        }
        Scope { bindings }
    }

    fn resolve(&self, name: &str) -> Option<VariableId> {
        self.bindings.iter().rev().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

pub struct Builder<'a> {
    repo: &'a mut Repository,
    classification: &'a Classification,
}

impl<'a> Builder<'a> {
    pub fn new(repo: &'a mut Repository, classification: &'a Classification) -> Self {
        Builder { repo, classification }
    }

    fn predicate_kind(&self, name: &str) -> Result<EntityKind, TranslationError> {
        self.classification
            .predicates
            .get(name)
            .copied()
            .ok_or_else(|| TranslationError::UnknownPredicate { name: name.to_string(), span: None })
    }

    fn function_kind(&self, name: &str) -> Result<EntityKind, TranslationError> {
        self.classification
            .functions
            .get(name)
            .copied()
            .ok_or_else(|| TranslationError::UnknownFunction { name: name.to_string(), span: None })
    }

    /// Interns the domain's declared predicate/function vocabulary, ahead
    /// of any synthetic per-action "identity" predicates that translating
    /// actions will later add to the same store.
    fn intern_predicate_vocabulary<D: RawDomain>(&mut self, domain: &D) -> (Vec<formalism::PredicateId>, Vec<formalism::FunctionId>) {
        let predicates = domain
            .predicate_signatures()
            .into_iter()
            .map(|(name, arity)| {
                let kind = self.classification.predicates.get(&name).copied().unwrap_or(EntityKind::Static);
                self.repo.intern_predicate(&name, arity, kind)
            })
            .collect();
        let functions = domain
            .function_signatures()
            .into_iter()
            .map(|(name, arity)| {
                let kind = self.classification.functions.get(&name).copied().unwrap_or(EntityKind::Static);
                self.repo.intern_function(&name, arity, kind)
            })
            .collect();
        (predicates, functions)
    }

    fn find_predicate(&self, name: &str) -> Result<formalism::PredicateId, TranslationError> {
        self.repo
            .predicates
            .iter()
            .find(|(_, p)| self.repo.resolve_name(p.name) == name)
            .map(|(id, _)| id)
            .ok_or_else(|| TranslationError::UnknownPredicate { name: name.to_string(), span: None })
    }

    fn find_function(&self, name: &str) -> Result<formalism::FunctionId, TranslationError> {
        self.repo
            .functions
            .iter()
            .find(|(_, f)| self.repo.resolve_name(f.name) == name)
            .map(|(id, _)| id)
            .ok_or_else(|| TranslationError::UnknownFunction { name: name.to_string(), span: None })
    }

    fn translate_term(&mut self, term: &RawTerm, scope: &Scope) -> Result<TermId, TranslationError> {
        match term {
            RawTerm::Variable(name) => {
                let var = scope
                    .resolve(name)
                    .ok_or_else(|| TranslationError::UnboundVariable { name: name.clone(), span: None })?;
                Ok(self.repo.intern_term_variable(var))
            }
            RawTerm::Constant(name) => {
                let object = self
                    .repo
                    .find_object(name)
                    .ok_or_else(|| TranslationError::UnknownObject { name: name.clone(), span: None })?;
                Ok(self.repo.intern_term_object(object))
            }
        }
    }

    fn translate_literal(&mut self, raw: &RawLiteral, scope: &Scope) -> Result<(formalism::LiteralId, EntityKind), TranslationError> {
        let predicate = self.find_predicate(&raw.predicate)?;
        let kind = self.predicate_kind(&raw.predicate)?;
        let expected_arity = self.repo.predicates.get(predicate).arity;
        if expected_arity != raw.args.len() as u32 {
            return Err(TranslationError::ArityMismatch {
                name: raw.predicate.clone(),
                expected: expected_arity,
                actual: raw.args.len() as u32,
                span: None,
            });
        }
        let mut terms = Vec::with_capacity(raw.args.len());
        for arg in &raw.args {
            terms.push(self.translate_term(arg, scope)?);
        }
        let atom = self.repo.intern_atom(predicate, terms);
        let literal = self.repo.literals.get_or_create(Literal { atom, polarity: raw.positive }).0;
        Ok((literal, kind))
    }

    fn translate_condition(&mut self, raw: &RawCondition, scope: &Scope) -> Result<ConjunctiveConditionIdOut, TranslationError> {
        let mut condition = ConjunctiveCondition::default();
        for literal in &raw.literals {
            let (id, kind) = self.translate_literal(literal, scope)?;
            match kind {
                EntityKind::Static => condition.static_literals.push(id),
                EntityKind::Fluent => condition.fluent_literals.push(id),
                EntityKind::Derived => condition.derived_literals.push(id),
                EntityKind::Auxiliary => condition.static_literals.push(id),
            }
        }
        for constraint in &raw.constraints {
            condition.numeric_constraints.push(self.translate_constraint(constraint, scope)?);
        }
        let id = self.repo.conjunctive_conditions.get_or_create(condition.clone()).0;
        Ok(ConjunctiveConditionIdOut { id, condition })
    }

    fn translate_constraint(&mut self, raw: &RawConstraint, scope: &Scope) -> Result<formalism::BooleanOperatorId, TranslationError> {
        let lhs = self.translate_expr(&raw.lhs, scope)?;
        let rhs = self.translate_expr(&raw.rhs, scope)?;
        let op = match raw.op {
            RawCompareOp::Eq => BooleanOpKind::Eq,
            RawCompareOp::Neq => BooleanOpKind::Neq,
            RawCompareOp::Leq => BooleanOpKind::Leq,
            RawCompareOp::Lt => BooleanOpKind::Lt,
            RawCompareOp::Geq => BooleanOpKind::Geq,
            RawCompareOp::Gt => BooleanOpKind::Gt,
        };
        Ok(self.repo.boolean_operators.get_or_create(BooleanOperator { op, lhs, rhs }).0)
    }

    fn translate_expr(&mut self, raw: &RawExpr, scope: &Scope) -> Result<FunctionExpressionId, TranslationError> {
        let expr = match raw {
            RawExpr::Number(n) => FunctionExpression::Constant(*n),
            RawExpr::FunctionTerm(name, args) => {
                let function = self.find_function(name)?;
                let kind = self.function_kind(name)?;
                let mut terms = Vec::with_capacity(args.len());
                for arg in args {
                    terms.push(self.translate_term(arg, scope)?);
                }
                let id = self.repo.function_terms.get_or_create(FunctionTerm { function, terms, kind }).0;
                FunctionExpression::FunctionTerm(id)
            }
            RawExpr::Neg(inner) => {
                let arg = self.translate_expr(inner, scope)?;
                let id = self.repo.unary_operators.get_or_create(UnaryOperator { op: UnaryOpKind::Neg, arg }).0;
                FunctionExpression::Unary(id)
            }
            RawExpr::Binary(op, lhs, rhs) => {
                let lhs = self.translate_expr(lhs, scope)?;
                let rhs = self.translate_expr(rhs, scope)?;
                let op = arith_op(*op);
                let id = self.repo.binary_operators.get_or_create(BinaryOperator { op, lhs, rhs }).0;
                FunctionExpression::Binary(id)
            }
            RawExpr::Multi(op, args) => {
                let mut ids = Vec::with_capacity(args.len());
                for a in args {
                    ids.push(self.translate_expr(a, scope)?);
                }
                let id = self.repo.multi_operators.get_or_create(MultiOperator { op: arith_op(*op), args: ids }).0;
                FunctionExpression::Multi(id)
            }
        };
        Ok(self.repo.function_expressions.get_or_create(expr).0)
    }

    fn translate_effect(&mut self, raw: &RawConditionalEffect, scope: &Scope) -> Result<formalism::ConditionalEffectId, TranslationError> {
        let extra_names: Vec<String> = raw.parameters.clone();
        let inner_scope = scope.extend(&extra_names);
        let parameters: Vec<VariableId> = extra_names.iter().map(|n| inner_scope.resolve(n).unwrap()).collect();

        let mut guard = Vec::with_capacity(raw.guard.len());
        for literal in &raw.guard {
            let (id, _) = self.translate_literal(literal, &inner_scope)?;
            guard.push(id);
        }

        let mut literals = Vec::with_capacity(raw.add.len());
        for literal in &raw.add {
            let (id, kind) = self.translate_literal(literal, &inner_scope)?;
            if kind != EntityKind::Fluent {
                return Err(TranslationError::KindMismatch(crate::error::KindMismatch {
                    name: literal.predicate.clone(),
                    classified: kind,
                    used_as: EntityKind::Fluent,
                    span: None,
                }));
            }
            literals.push(id);
        }

        let mut numeric_effects = Vec::with_capacity(raw.numeric.len());
        for numeric in &raw.numeric {
            let (fname, fargs) = &numeric.target;
            let function = self.find_function(fname)?;
            let kind = self.function_kind(fname)?;
            let mut terms = Vec::with_capacity(fargs.len());
            for arg in fargs {
                terms.push(self.translate_term(arg, &inner_scope)?);
            }
            let target = self.repo.function_terms.get_or_create(FunctionTerm { function, terms, kind }).0;
            let value = self.translate_expr(&numeric.value, &inner_scope)?;
            let effect_kind = match numeric.kind {
                RawNumericEffectKind::Assign => NumericEffectKind::Assign,
                RawNumericEffectKind::Increase => NumericEffectKind::Increase,
                RawNumericEffectKind::Decrease => NumericEffectKind::Decrease,
            };
            numeric_effects.push(NumericEffect { kind: effect_kind, target, value });
        }

        let effect_id = self.repo.conjunctive_effects.get_or_create(ConjunctiveEffect { literals, numeric_effects }).0;
        Ok(self
            .repo
            .conditional_effects
            .get_or_create(ConditionalEffect { parameters, guard, effect: effect_id })
            .0)
    }

    /// Builds the lifted datalog rule grounding enumerates over, given the
    /// already-translated condition and a head atom.
    fn build_rule(&mut self, parameters: Vec<VariableId>, condition: &ConjunctiveCondition, head: formalism::AtomId) -> RuleId {
        self.repo
            .rules
            .get_or_create(Rule {
                parameters,
                static_body: condition.static_literals.clone(),
                fluent_body: condition.fluent_literals.clone(),
                derived_body: condition.derived_literals.clone(),
                numeric_body: condition.numeric_constraints.clone(),
                head,
            })
            .0
    }

    pub fn translate_action<A: RawAction>(&mut self, raw: &A) -> Result<ActionId, TranslationError> {
        let scope = Scope::push_parameters(raw.parameters());
        let parameters: Vec<VariableId> = (0..raw.parameters().len() as u32).map(VariableId::new).collect();

        let precondition = self.translate_condition(raw.precondition(), &scope)?;

        let mut effects = Vec::with_capacity(raw.effects().len());
        for effect in raw.effects() {
            effects.push(self.translate_effect(effect, &scope)?);
        }

        let action_predicate = self.repo.intern_predicate(&format!("@action:{}", raw.name()), parameters.len() as u32, EntityKind::Fluent);
        let head_terms: Vec<TermId> = parameters.iter().map(|v| self.repo.intern_term_variable(*v)).collect();
        let head_atom = self.repo.intern_atom(action_predicate, head_terms);
        let rule = self.build_rule(parameters.clone(), &precondition.condition, head_atom);

        Ok(self
            .repo
            .actions
            .get_or_create(Action { name: raw.name().to_string(), parameters, precondition: precondition.id, effects, rule })
            .0)
    }

    pub fn translate_axiom<X: RawAxiom>(&mut self, raw: &X) -> Result<AxiomId, TranslationError> {
        let scope = Scope::push_parameters(raw.parameters());
        let parameters: Vec<VariableId> = (0..raw.parameters().len() as u32).map(VariableId::new).collect();

        let body = self.translate_condition(raw.body(), &scope)?;

        let (head_name, head_args) = raw.head();
        let predicate = self.find_predicate(head_name)?;
        let mut head_terms = Vec::with_capacity(head_args.len());
        for arg in head_args {
            let var = scope.resolve(arg).ok_or_else(|| TranslationError::UnboundVariable { name: arg.clone(), span: None })?;
            head_terms.push(self.repo.intern_term_variable(var));
        }
        let head_atom = self.repo.intern_atom(predicate, head_terms);
        let head_literal = self.repo.literals.get_or_create(Literal { atom: head_atom, polarity: true }).0;
        let rule = self.build_rule(parameters.clone(), &body.condition, head_atom);

        Ok(self.repo.axioms.get_or_create(Axiom { parameters, body: body.id, head: head_literal, rule }).0)
    }

    pub fn translate_domain<D: RawDomain>(&mut self, domain: &D) -> Result<formalism::Domain, TranslationError> {
        let (predicates, functions) = self.intern_predicate_vocabulary(domain);

        let mut constants = Vec::with_capacity(domain.constants().len());
        for name in domain.constants() {
            constants.push(self.repo.intern_object(name));
        }

        let mut actions = Vec::with_capacity(domain.actions().len());
        for action in domain.actions() {
            actions.push(self.translate_action(action)?);
        }

        let mut axioms = Vec::with_capacity(domain.axioms().len());
        for axiom in domain.axioms() {
            axioms.push(self.translate_axiom(axiom)?);
        }

        Ok(formalism::Domain { name: domain.name().to_string(), predicates, functions, constants, actions, axioms })
    }

    pub fn translate_problem<P: RawProblem>(&mut self, problem: &P) -> Result<formalism::Task, TranslationError> {
        let mut objects = Vec::with_capacity(problem.objects().len());
        for name in problem.objects() {
            objects.push(self.repo.intern_object(name));
        }

        let empty_scope = Scope::default();
        let mut initial_static_atoms = Vec::new();
        let mut initial_fluent_atoms = Vec::new();
        for literal in problem.initial_literals() {
            if !literal.positive {
                return Err(TranslationError::UnknownPredicate { name: literal.predicate.clone(), span: None });
            }
            let predicate = self.find_predicate(&literal.predicate)?;
            let kind = self.predicate_kind(&literal.predicate)?;
            let mut objs = Vec::with_capacity(literal.args.len());
            for arg in &literal.args {
                objs.push(self.resolve_ground_term(arg, &empty_scope)?);
            }
            let ground_atom = self.repo.intern_ground_atom(predicate, objs);
            match kind {
                EntityKind::Fluent => initial_fluent_atoms.push(ground_atom),
                _ => initial_static_atoms.push(ground_atom),
            }
        }

        let mut initial_function_values = Vec::new();
        for ((fname, fargs), value) in problem.initial_function_values() {
            let function = self.find_function(fname)?;
            let mut objs = Vec::with_capacity(fargs.len());
            for arg in fargs {
                objs.push(self.resolve_ground_term(arg, &empty_scope)?);
            }
            let kind = self.function_kind(fname)?;
            let term = self.repo.ground_function_terms.get_or_create(formalism::GroundFunctionTerm { function, objects: objs, kind }).0;
            initial_function_values.push(self.repo.ground_function_values.get_or_create(GroundFunctionValue { term, value: *value }).0);
        }

        let mut goal = Vec::with_capacity(problem.goal().literals.len());
        for literal in &problem.goal().literals {
            let predicate = self.find_predicate(&literal.predicate)?;
            let mut objs = Vec::with_capacity(literal.args.len());
            for arg in &literal.args {
                objs.push(self.resolve_ground_term(arg, &empty_scope)?);
            }
            goal.push(self.repo.intern_ground_atom(predicate, objs));
        }

        let metric: Option<MetricId> = match problem.metric() {
            None => None,
            Some((objective, expr)) => {
                let expression = self.translate_ground_expr(expr)?;
                let objective = match objective {
                    RawMetricObjective::Minimize => formalism::MetricObjective::Minimize,
                    RawMetricObjective::Maximize => formalism::MetricObjective::Maximize,
                };
                Some(self.repo.metrics.get_or_create(formalism::Metric { objective, expression }).0)
            }
        };

        Ok(formalism::Task {
            name: "problem".to_string(),
            objects,
            initial_static_atoms,
            initial_fluent_atoms,
            initial_function_values,
            goal,
            metric,
        })
    }

    fn resolve_ground_term(&mut self, term: &RawTerm, scope: &Scope) -> Result<formalism::ObjectId, TranslationError> {
        match term {
            RawTerm::Constant(name) => {
                self.repo.find_object(name).ok_or_else(|| TranslationError::UnknownObject { name: name.clone(), span: None })
            }
            RawTerm::Variable(name) => {
                // Only meaningful inside a still-lifted context; ground
                // sections of the input (init/goal) never reference one.
                let _ = scope;
                Err(TranslationError::UnboundVariable { name: name.clone(), span: None })
            }
        }
    }

    fn translate_ground_expr(&mut self, raw: &RawExpr) -> Result<formalism::GroundFunctionExpressionId, TranslationError> {
        let empty_scope = Scope::default();
        let expr = match raw {
            RawExpr::Number(n) => formalism::GroundFunctionExpression::Constant(*n),
            RawExpr::FunctionTerm(name, args) => {
                let function = self.find_function(name)?;
                let kind = self.function_kind(name)?;
                let mut objs = Vec::with_capacity(args.len());
                for a in args {
                    objs.push(self.resolve_ground_term(a, &empty_scope)?);
                }
                let term = self.repo.ground_function_terms.get_or_create(formalism::GroundFunctionTerm { function, objects: objs, kind }).0;
                formalism::GroundFunctionExpression::FunctionTerm(term)
            }
            RawExpr::Neg(inner) => {
                let arg = self.translate_ground_expr(inner)?;
                formalism::GroundFunctionExpression::Unary(UnaryOpKind::Neg, arg)
            }
            RawExpr::Binary(op, lhs, rhs) => {
                let lhs = self.translate_ground_expr(lhs)?;
                let rhs = self.translate_ground_expr(rhs)?;
                formalism::GroundFunctionExpression::Binary(arith_op(*op), lhs, rhs)
            }
            RawExpr::Multi(op, args) => {
                let mut ids = Vec::with_capacity(args.len());
                for a in args {
                    ids.push(self.translate_ground_expr(a)?);
                }
                formalism::GroundFunctionExpression::Multi(arith_op(*op), ids)
            }
        };
        Ok(self.repo.ground_function_expressions.get_or_create(expr).0)
    }
}

struct ConjunctiveConditionIdOut {
    id: formalism::ConjunctiveConditionId,
    condition: ConjunctiveCondition,
}

fn arith_op(op: RawArithOp) -> ArithmeticOpKind {
    match op {
        RawArithOp::Add => ArithmeticOpKind::Add,
        RawArithOp::Sub => ArithmeticOpKind::Sub,
        RawArithOp::Mul => ArithmeticOpKind::Mul,
        RawArithOp::Div => ArithmeticOpKind::Div,
    }
}

/// Runs the full classify → translate pipeline over a domain/problem pair.
pub fn translate<D: RawDomain, P: RawProblem>(
    repo: &mut Repository,
    domain: &D,
    problem: &P,
) -> Result<(formalism::Domain, formalism::Task), TranslationError> {
    let classification = classify(domain)?;
    let mut builder = Builder::new(repo, &classification);
    let domain = builder.translate_domain(domain)?;
    let task = builder.translate_problem(problem)?;
    Ok((domain, task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawLiteral, RawTerm};
    use crate::tree::{TreeAction, TreeDomain, TreeProblem};

    /// One `(move ?from ?to)` action over two locations, no axioms: checks
    /// the whole classify → translate pipeline wires up without error and
    /// that the resulting rule partitions bodies by classification.
    fn tiny_domain() -> TreeDomain {
        TreeDomain {
            name: "tiny".into(),
            predicates: vec![("at".into(), 1), ("connected".into(), 2)],
            functions: vec![],
            constants: vec![],
            actions: vec![TreeAction {
                name: "move".into(),
                parameters: vec!["?to".into()],
                precondition: RawCondition {
                    literals: vec![RawLiteral {
                        predicate: "connected".into(),
                        args: vec![RawTerm::Constant("here".into()), RawTerm::Variable("?to".into())],
                        positive: true,
                    }],
                    constraints: vec![],
                },
                effects: vec![RawConditionalEffect {
                    add: vec![RawLiteral { predicate: "at".into(), args: vec![RawTerm::Variable("?to".into())], positive: true }],
                    ..Default::default()
                }],
            }],
            axioms: vec![],
        }
    }

    #[test]
    fn translate_wires_a_tiny_domain_without_error() {
        let mut repo = Repository::new();
        repo.intern_object("here");
        repo.intern_object("there");
        let domain = tiny_domain();
        let problem = TreeProblem {
            objects: vec!["here".into(), "there".into()],
            initial_literals: vec![
                RawLiteral { predicate: "connected".into(), args: vec![RawTerm::Constant("here".into()), RawTerm::Constant("there".into())], positive: true },
                RawLiteral { predicate: "at".into(), args: vec![RawTerm::Constant("here".into())], positive: true },
            ],
            initial_function_values: vec![],
            goal: RawCondition {
                literals: vec![RawLiteral { predicate: "at".into(), args: vec![RawTerm::Constant("there".into())], positive: true }],
                constraints: vec![],
            },
            metric: None,
        };

        let (domain_out, task) = translate(&mut repo, &domain, &problem).expect("translation should succeed");
        assert_eq!(domain_out.actions.len(), 1);
        assert_eq!(task.goal.len(), 1);

        let action = repo.actions.get(domain_out.actions[0]);
        let rule = repo.rules.get(action.rule);
        // `connected` is static (never an effect head) so it belongs in the
        // static partition; `at` is fluent so the action's own identity
        // atom (also fluent) is the rule head, not part of the body.
        assert_eq!(rule.static_body.len(), 1);
        assert!(rule.fluent_body.is_empty());
    }

    #[test]
    fn unbound_variable_in_precondition_is_rejected() {
        let mut repo = Repository::new();
        let mut domain = tiny_domain();
        domain.actions[0].precondition.literals[0].args[1] = RawTerm::Variable("?unbound".into());
        let problem = TreeProblem::default();
        let result = translate(&mut repo, &domain, &problem);
        assert!(matches!(result, Err(TranslationError::UnboundVariable { .. })));
    }
}
