//! End-to-end fixtures driving the whole translate -> ground -> pack ->
//! match-tree pipeline through [`planning::ground_task`], one classical
//! planning domain per fixture. Each domain is built directly as a
//! [`TreeDomain`]/[`TreeProblem`] pair (no text parser in this crate).

use hashbrown::HashSet;

use planning::{ground_task, GeneratorElement};
use translate::raw::{RawCondition, RawConditionalEffect, RawLiteral, RawTerm};
use translate::tree::{TreeAction, TreeAxiom, TreeDomain, TreeProblem};

fn lit(predicate: &str, args: &[&str], positive: bool) -> RawLiteral {
    RawLiteral {
        predicate: predicate.into(),
        args: args.iter().map(|a| RawTerm::Variable((*a).into())).collect(),
        positive,
    }
}

fn clit(predicate: &str, args: &[&str], positive: bool) -> RawLiteral {
    RawLiteral {
        predicate: predicate.into(),
        args: args.iter().map(|a| RawTerm::Constant((*a).into())).collect(),
        positive,
    }
}

fn action_count(actions: &HashSet<GeneratorElement>) -> usize {
    actions.iter().filter(|e| matches!(e, GeneratorElement::Action(_))).count()
}

/// One truck, one package, two locations, `drive`/`load`/`unload`
/// (intra-city only, no `fly` since there is only one city). `connected`
/// is declared in both directions, so both `drive` groundings are
/// reachable once the truck has visited both locations, but at the true
/// initial state only the truck's current location constrains anything.
///
/// Applicable at the initial state: `drive(loc-a, loc-b)` (truck is at
/// loc-a, loc-a connects to loc-b) and `load(package1, loc-a)` (truck and
/// package share loc-a) — the other four groundings (`drive(loc-b,
/// loc-a)`, the two `load`/`unload` combinations touching loc-b, and
/// `unload(package1, loc-a)`) all depend on a fact that only becomes true
/// after one of these two actions runs, so none of them hold in the
/// initial fact set itself.
#[test]
fn logistics_two_locations_has_two_applicable_actions_at_the_initial_state() {
    let domain = TreeDomain {
        name: "logistics".into(),
        predicates: vec![("at-truck".into(), 1), ("at-pkg".into(), 2), ("in-truck".into(), 1), ("connected".into(), 2)],
        functions: vec![],
        constants: vec![],
        actions: vec![
            TreeAction {
                name: "drive".into(),
                parameters: vec!["?from".into(), "?to".into()],
                precondition: RawCondition { literals: vec![lit("at-truck", &["?from"], true), lit("connected", &["?from", "?to"], true)], constraints: vec![] },
                effects: vec![RawConditionalEffect {
                    add: vec![lit("at-truck", &["?from"], false), lit("at-truck", &["?to"], true)],
                    ..Default::default()
                }],
            },
            TreeAction {
                name: "load".into(),
                parameters: vec!["?pkg".into(), "?loc".into()],
                precondition: RawCondition { literals: vec![lit("at-truck", &["?loc"], true), lit("at-pkg", &["?pkg", "?loc"], true)], constraints: vec![] },
                effects: vec![RawConditionalEffect {
                    add: vec![lit("at-pkg", &["?pkg", "?loc"], false), lit("in-truck", &["?pkg"], true)],
                    ..Default::default()
                }],
            },
            TreeAction {
                name: "unload".into(),
                parameters: vec!["?pkg".into(), "?loc".into()],
                precondition: RawCondition { literals: vec![lit("at-truck", &["?loc"], true), lit("in-truck", &["?pkg"], true)], constraints: vec![] },
                effects: vec![RawConditionalEffect {
                    add: vec![lit("in-truck", &["?pkg"], false), lit("at-pkg", &["?pkg", "?loc"], true)],
                    ..Default::default()
                }],
            },
        ],
        axioms: vec![],
    };

    let problem = TreeProblem {
        objects: vec!["truck".into(), "package1".into(), "loc-a".into(), "loc-b".into()],
        initial_literals: vec![
            clit("at-truck", &["loc-a"], true),
            clit("at-pkg", &["package1", "loc-a"], true),
            clit("connected", &["loc-a", "loc-b"], true),
            clit("connected", &["loc-b", "loc-a"], true),
        ],
        initial_function_values: vec![],
        goal: RawCondition { literals: vec![clit("at-pkg", &["package1", "loc-b"], true)], constraints: vec![] },
        metric: None,
    };

    let (_repo, task) = ground_task(&domain, &problem, 64).expect("logistics domain should ground without error");

    let applicable = task.applicable_actions(&task.initial_state);
    assert_eq!(action_count(&applicable), 2);
    assert!(!task.goal_holds(&task.initial_state));
}

/// Classical 3-block blocks world: A, B, C all start on the table, all
/// clear, gripper empty. Goal `on(A,B) ∧ on(B,C)`.
///
/// Applicable at the initial state: `pick-up(A)`, `pick-up(B)`,
/// `pick-up(C)` — every block is both `clear` and `on-table`, and the
/// gripper is empty, so all three pick-ups hold; none of `put-down`,
/// `stack`, `unstack` have a satisfiable precondition yet since nothing is
/// held and nothing is stacked.
#[test]
fn blocks_world_three_blocks_on_the_table_has_three_applicable_pick_ups() {
    let domain = TreeDomain {
        name: "blocks".into(),
        predicates: vec![
            ("clear".into(), 1),
            ("on-table".into(), 1),
            ("on".into(), 2),
            ("holding".into(), 1),
            ("hand-empty".into(), 0),
        ],
        functions: vec![],
        constants: vec![],
        actions: vec![
            TreeAction {
                name: "pick-up".into(),
                parameters: vec!["?x".into()],
                precondition: RawCondition {
                    literals: vec![lit("clear", &["?x"], true), lit("on-table", &["?x"], true), lit("hand-empty", &[], true)],
                    constraints: vec![],
                },
                effects: vec![RawConditionalEffect {
                    add: vec![
                        lit("on-table", &["?x"], false),
                        lit("clear", &["?x"], false),
                        lit("hand-empty", &[], false),
                        lit("holding", &["?x"], true),
                    ],
                    ..Default::default()
                }],
            },
            TreeAction {
                name: "put-down".into(),
                parameters: vec!["?x".into()],
                precondition: RawCondition { literals: vec![lit("holding", &["?x"], true)], constraints: vec![] },
                effects: vec![RawConditionalEffect {
                    add: vec![
                        lit("holding", &["?x"], false),
                        lit("on-table", &["?x"], true),
                        lit("clear", &["?x"], true),
                        lit("hand-empty", &[], true),
                    ],
                    ..Default::default()
                }],
            },
            TreeAction {
                name: "stack".into(),
                parameters: vec!["?x".into(), "?y".into()],
                precondition: RawCondition { literals: vec![lit("holding", &["?x"], true), lit("clear", &["?y"], true)], constraints: vec![] },
                effects: vec![RawConditionalEffect {
                    add: vec![
                        lit("holding", &["?x"], false),
                        lit("clear", &["?y"], false),
                        lit("clear", &["?x"], true),
                        lit("hand-empty", &[], true),
                        lit("on", &["?x", "?y"], true),
                    ],
                    ..Default::default()
                }],
            },
            TreeAction {
                name: "unstack".into(),
                parameters: vec!["?x".into(), "?y".into()],
                precondition: RawCondition {
                    literals: vec![lit("on", &["?x", "?y"], true), lit("clear", &["?x"], true), lit("hand-empty", &[], true)],
                    constraints: vec![],
                },
                effects: vec![RawConditionalEffect {
                    add: vec![
                        lit("on", &["?x", "?y"], false),
                        lit("clear", &["?x"], false),
                        lit("hand-empty", &[], false),
                        lit("holding", &["?x"], true),
                        lit("clear", &["?y"], true),
                    ],
                    ..Default::default()
                }],
            },
        ],
        axioms: vec![],
    };

    let problem = TreeProblem {
        objects: vec!["a".into(), "b".into(), "c".into()],
        initial_literals: vec![
            clit("clear", &["a"], true),
            clit("clear", &["b"], true),
            clit("clear", &["c"], true),
            clit("on-table", &["a"], true),
            clit("on-table", &["b"], true),
            clit("on-table", &["c"], true),
            RawLiteral { predicate: "hand-empty".into(), args: vec![], positive: true },
        ],
        initial_function_values: vec![],
        goal: RawCondition {
            literals: vec![clit("on", &["a", "b"], true), clit("on", &["b", "c"], true)],
            constraints: vec![],
        },
        metric: None,
    };

    let (_repo, task) = ground_task(&domain, &problem, 64).expect("blocks world domain should ground without error");

    let applicable = task.applicable_actions(&task.initial_state);
    assert_eq!(action_count(&applicable), 3);
    assert!(!task.goal_holds(&task.initial_state));
}

/// Classical gripper domain, 2 balls and 2 rooms: robot and both balls
/// start in room-a, both grippers free. `move` has no connectivity guard
/// (every pair of rooms is reachable in one hop, as in the standard
/// gripper domain).
///
/// Applicable at the initial state: one `move(room-a, room-b)` plus four
/// `pick` groundings (2 balls x 2 grippers, both balls being in room-a) =
/// 5 total. No `drop` is applicable since no gripper is carrying anything
/// yet.
#[test]
fn gripper_two_balls_has_five_applicable_actions_at_the_initial_state() {
    let domain = TreeDomain {
        name: "gripper".into(),
        predicates: vec![("at-robby".into(), 1), ("at-ball".into(), 2), ("free".into(), 1), ("carry".into(), 2)],
        functions: vec![],
        constants: vec![],
        actions: vec![
            TreeAction {
                name: "move".into(),
                parameters: vec!["?from".into(), "?to".into()],
                precondition: RawCondition { literals: vec![lit("at-robby", &["?from"], true)], constraints: vec![] },
                effects: vec![RawConditionalEffect {
                    add: vec![lit("at-robby", &["?from"], false), lit("at-robby", &["?to"], true)],
                    ..Default::default()
                }],
            },
            TreeAction {
                name: "pick".into(),
                parameters: vec!["?ball".into(), "?room".into(), "?gripper".into()],
                precondition: RawCondition {
                    literals: vec![
                        lit("at-ball", &["?ball", "?room"], true),
                        lit("at-robby", &["?room"], true),
                        lit("free", &["?gripper"], true),
                    ],
                    constraints: vec![],
                },
                effects: vec![RawConditionalEffect {
                    add: vec![lit("at-ball", &["?ball", "?room"], false), lit("free", &["?gripper"], false), lit("carry", &["?ball", "?gripper"], true)],
                    ..Default::default()
                }],
            },
            TreeAction {
                name: "drop".into(),
                parameters: vec!["?ball".into(), "?room".into(), "?gripper".into()],
                precondition: RawCondition { literals: vec![lit("carry", &["?ball", "?gripper"], true), lit("at-robby", &["?room"], true)], constraints: vec![] },
                effects: vec![RawConditionalEffect {
                    add: vec![lit("carry", &["?ball", "?gripper"], false), lit("free", &["?gripper"], true), lit("at-ball", &["?ball", "?room"], true)],
                    ..Default::default()
                }],
            },
        ],
        axioms: vec![],
    };

    let problem = TreeProblem {
        objects: vec!["room-a".into(), "room-b".into(), "ball1".into(), "ball2".into(), "gripper-left".into(), "gripper-right".into()],
        initial_literals: vec![
            clit("at-robby", &["room-a"], true),
            clit("at-ball", &["ball1", "room-a"], true),
            clit("at-ball", &["ball2", "room-a"], true),
            clit("free", &["gripper-left"], true),
            clit("free", &["gripper-right"], true),
        ],
        initial_function_values: vec![],
        goal: RawCondition { literals: vec![clit("at-ball", &["ball1", "room-b"], true), clit("at-ball", &["ball2", "room-b"], true)], constraints: vec![] },
        metric: None,
    };

    let (_repo, task) = ground_task(&domain, &problem, 64).expect("gripper domain should ground without error");

    let applicable = task.applicable_actions(&task.initial_state);
    assert_eq!(action_count(&applicable), 5);
    assert!(!task.goal_holds(&task.initial_state));
}

/// A trivial domain with one derived predicate and no actions, used to
/// check axioms actually ground and the facade's `derived_atoms`
/// partition sees them, independently of any action machinery.
#[test]
fn a_derived_predicate_grounds_through_an_axiom() {
    let domain = TreeDomain {
        name: "derived".into(),
        predicates: vec![("raw".into(), 1), ("processed".into(), 1)],
        functions: vec![],
        constants: vec![],
        actions: vec![],
        axioms: vec![TreeAxiom {
            parameters: vec!["?x".into()],
            body: RawCondition { literals: vec![lit("raw", &["?x"], true)], constraints: vec![] },
            head_predicate: "processed".into(),
            head_args: vec!["?x".into()],
        }],
    };

    let problem = TreeProblem {
        objects: vec!["item1".into()],
        initial_literals: vec![clit("raw", &["item1"], true)],
        initial_function_values: vec![],
        goal: RawCondition { literals: vec![clit("processed", &["item1"], true)], constraints: vec![] },
        metric: None,
    };

    let (_repo, task) = ground_task(&domain, &problem, 64).expect("derived-predicate domain should ground without error");

    assert_eq!(task.ground_axioms.len(), 1);
    assert_eq!(task.derived_atoms.len(), 1);
}

/// An axiom whose head references only a strict subset of its parameters
/// (`?y` is existentially quantified away), arranged so the head's own
/// vertex becomes valid a full round before the binding that completes
/// it does. `link` is a static fact present from the start, but
/// `enabled(?y)` is itself only derivable through a second axiom that
/// runs later in the same enumerator order — so `reachable(item1)` can
/// only ground once a *previously seen* head clique picks up a binding
/// that became available in a later round, not when the head clique
/// itself first appears.
#[test]
fn an_axiom_with_an_existential_parameter_grounds_across_rounds() {
    let domain = TreeDomain {
        name: "existential-axiom".into(),
        predicates: vec![
            ("base".into(), 1),
            ("link".into(), 2),
            ("trigger".into(), 1),
            ("enabled".into(), 1),
            ("reachable".into(), 1),
        ],
        functions: vec![],
        constants: vec![],
        actions: vec![],
        axioms: vec![
            TreeAxiom {
                parameters: vec!["?x".into(), "?y".into()],
                body: RawCondition {
                    literals: vec![lit("base", &["?x"], true), lit("link", &["?x", "?y"], true), lit("enabled", &["?y"], true)],
                    constraints: vec![],
                },
                head_predicate: "reachable".into(),
                head_args: vec!["?x".into()],
            },
            TreeAxiom {
                parameters: vec!["?y".into()],
                body: RawCondition { literals: vec![lit("trigger", &["?y"], true)], constraints: vec![] },
                head_predicate: "enabled".into(),
                head_args: vec!["?y".into()],
            },
        ],
    };

    let problem = TreeProblem {
        objects: vec!["item1".into(), "other1".into()],
        initial_literals: vec![clit("base", &["item1"], true), clit("link", &["item1", "other1"], true), clit("trigger", &["other1"], true)],
        initial_function_values: vec![],
        goal: RawCondition { literals: vec![clit("reachable", &["item1"], true)], constraints: vec![] },
        metric: None,
    };

    let (_repo, task) = ground_task(&domain, &problem, 64).expect("existential-axiom domain should ground without error");

    assert_eq!(task.ground_axioms.len(), 2);
    assert_eq!(task.derived_atoms.len(), 2);
}

/// Grounding the same domain/problem twice through independent
/// repositories must produce the same reachable-action count: interning
/// is deterministic given the same input, not a side effect of call
/// order.
#[test]
fn grounding_the_same_problem_twice_is_deterministic() {
    let domain = TreeDomain {
        name: "idempotence".into(),
        predicates: vec![("on".into(), 1)],
        functions: vec![],
        constants: vec![],
        actions: vec![TreeAction {
            name: "flip".into(),
            parameters: vec!["?x".into()],
            precondition: RawCondition::default(),
            effects: vec![RawConditionalEffect { add: vec![lit("on", &["?x"], true)], ..Default::default() }],
        }],
        axioms: vec![],
    };
    let problem = TreeProblem { objects: vec!["a".into(), "b".into()], ..Default::default() };

    let (_repo1, task1) = ground_task(&domain, &problem, 64).unwrap();
    let (_repo2, task2) = ground_task(&domain, &problem, 64).unwrap();

    assert_eq!(task1.ground_actions.len(), task2.ground_actions.len());
    assert_eq!(task1.ground_actions.len(), 2);
}
