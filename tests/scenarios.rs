//! Acceptance scenarios for the reference machines

use pushdown::*;
use test_case::test_case;
use test_helpers::*;

#[test_case("ab", true ; "push on a then pop on b")]
#[test_case("a", false ; "halts in state one")]
#[test_case("ba", false ; "no rule for b from start")]
#[test_case("abb", false ; "trailing b traps")]
#[test_case("", false ; "empty string stays in start state")]
fn push_pop_language(input: &str, expected: bool) {
    let machine = load_fixture(PUSH_POP);
    assert_eq!(machine.classification(), Classification::Dpda);
    assert_eq!(machine.simulator(&EngineConfig::default()).accepts(input), expected);
}

#[test_case("ab", true)]
#[test_case("aabb", true)]
#[test_case("aaaabbbb", true)]
#[test_case("", false ; "empty")]
#[test_case("aab", false)]
#[test_case("abb", false)]
#[test_case("ba", false)]
#[test_case("abab", false)]
fn anbn_language(input: &str, expected: bool) {
    let machine = load_fixture(ANBN);
    assert_eq!(machine.classification(), Classification::Dpda);
    assert_eq!(machine.simulator(&EngineConfig::default()).accepts(input), expected);
}

#[test_case("", true ; "empty")]
#[test_case("()", true ; "single pair")]
#[test_case("(())()", true ; "nested then sibling")]
#[test_case("((()))", true ; "deep nesting")]
#[test_case("(()", false ; "unclosed")]
#[test_case(")(", false ; "close before open")]
#[test_case("())", false ; "extra close")]
fn balanced_language(input: &str, expected: bool) {
    let machine = load_fixture(BALANCED);
    assert_eq!(machine.simulator(&EngineConfig::default()).accepts(input), expected);
}

#[test]
fn colliding_keys_keep_later_transition() {
    let machine = load_fixture(COLLIDING);

    assert_eq!(machine.classification(), Classification::Npda);
    let effective = machine
        .pda()
        .table()
        .get(State::START, Symbol::Char('a'), Symbol::Epsilon)
        .expect("entry present");
    assert_eq!(effective.to, State::new(2));
    assert_eq!(effective.push, Symbol::Char('y'));

    match &machine.determinism().diagnostics[..] {
        [Diagnostic::KeyCollision(collision)] => {
            assert_eq!(collision.previous.to, State::new(1));
            assert_eq!(collision.replacement.to, State::new(2));
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }

    // Still executable with the later entry in effect
    let outcome = machine.simulator(&EngineConfig::default()).run("a");
    assert!(outcome.accepted);
    assert_eq!(outcome.final_state, State::new(2));
}

#[test]
fn empty_stack_pop_matches_only_epsilon_rule() {
    let config = EngineConfig::default();

    let strict = load_fixture("{1}\n0,a,x,1,\n");
    let outcome = strict.simulator(&config).run("a");
    assert_eq!(outcome.final_state, State::TRAP);
    assert_eq!(outcome.rejection, Some(Rejection::Trapped));

    let lenient = load_fixture("{2}\n0,a,x,1,\n0,a,,2,\n");
    let outcome = lenient.simulator(&config).run("a");
    assert!(outcome.accepted);
    assert_eq!(outcome.final_state, State::new(2));
}

#[test]
fn stack_epsilon_preemption_defers_input() {
    // After 'a' pushes m, state 1 has an epsilon rule on m that must fire
    // before 'b' is read.
    let machine = load_fixture("{3}\n0,a,,1,m\n1,,m,2,\n2,b,,3,\n");
    let outcome = machine.simulator(&EngineConfig::default()).run("ab");

    assert!(outcome.accepted);
    assert_eq!(outcome.steps, 3);
}

#[test]
fn epsilon_loop_is_cut_by_budget() {
    let machine = load_fixture(EPSILON_LOOP);
    let outcome = machine
        .simulator(&EngineConfig::with_step_budget(500))
        .run("a");

    assert!(!outcome.accepted, "timeouts never accept");
    assert!(outcome.timed_out);
    assert_eq!(outcome.steps, 500);
    assert_eq!(outcome.final_state, State::START);
}

#[test]
fn run_finishing_on_the_last_budgeted_step_times_out() {
    let machine = load_fixture(PUSH_POP);

    let outcome = Simulator::new(machine.pda(), 2).run("ab");
    assert_eq!(outcome.steps, 2);
    assert_eq!(outcome.final_state, State::new(5));
    assert!(outcome.timed_out);
    assert!(!outcome.accepted);
    assert_eq!(outcome.rejection, Some(Rejection::StepBudgetExhausted));

    let outcome = Simulator::new(machine.pda(), 3).run("ab");
    assert_eq!(outcome.steps, 2);
    assert!(!outcome.timed_out);
    assert!(outcome.accepted);
}

#[test]
fn stack_symbols_may_lie_outside_input_set() {
    let machine = load_fixture("{2}\n0,a,,1,é\n1,b,é,2,\n");

    assert_eq!(machine.classification(), Classification::Dpda);
    assert_eq!(
        machine.pda().stack_alphabet().iter().collect::<String>(),
        "é"
    );
    assert!(machine.simulator(&EngineConfig::default()).accepts("ab"));
}

#[test]
fn invalid_machines_are_never_run() {
    for definition in [
        "{256}\n0,a,,1,\n",
        "{1}\n0,a,,1,\n300,a,,1,\n",
        "{1}\n0,\u{7},,1,\n",
        "{1}\n0,ab,,1,\n",
        "{1}\nzero,a,,1,\n",
    ] {
        let report = batch::evaluate_definition(definition, &["a"], &EngineConfig::default());
        assert_eq!(report.classification, Classification::Invalid, "{definition:?}");
        assert_eq!(report.evaluated, 0);
    }
}
