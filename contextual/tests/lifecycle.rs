//! Tree-level lifecycle tests: execution order, fixture composition,
//! failure isolation, duplicate registrations, and binding defects.

use std::cell::RefCell;
use std::rc::Rc;

use contextual::builder::ContextBuilder;
use contextual::case::{RootSpec, TestCase};
use contextual::test_support::{Outcome, RecordingCollector};

#[derive(Default)]
struct World {
    events: Vec<String>,
}

fn push(event: &str) -> impl Fn(&mut World) + 'static {
    let event = event.to_string();
    move |world| world.events.push(event.clone())
}

/// Tree shape:
/// ```text
/// given A          (set_up "su A", tear_down "td A")
/// ├── then "a leaf"
/// └── given B      (set_up "su B", tear_down "td B")
///     └── then "b leaf"
/// given sibling    (set_up "su sib", tear_down "td sib")
/// └── then "sibling leaf"
/// ```
struct OrderSpec;

impl RootSpec for OrderSpec {
    type State = World;

    fn initial_state(&self) -> World {
        World::default()
    }

    fn spec(&self, cx: &mut ContextBuilder<'_, World>) {
        cx.given("A", |cx| {
            cx.set_up(push("su A"));
            cx.tear_down(push("td A"));
            cx.then("a leaf", push("body a"));
            cx.given("B", |cx| {
                cx.set_up(push("su B"));
                cx.tear_down(push("td B"));
                cx.then("b leaf", push("body b"));
            });
        });
        cx.given("sibling", |cx| {
            cx.set_up(push("su sib"));
            cx.tear_down(push("td sib"));
            cx.then("sibling leaf", push("body sib"));
        });
    }
}

/// A parent's own thens run before its children; siblings follow
/// declaration order; every leaf completes its full fixture sandwich
/// before the next leaf begins.
#[test]
fn leaves_run_depth_first_in_declaration_order() {
    let case = TestCase::new(OrderSpec).expect("valid spec");
    assert_eq!(case.count(), 3);

    let mut collector = RecordingCollector::new();
    case.run(&mut collector);

    assert_eq!(
        collector.names(),
        [
            "OrderSpec::given A, then a leaf",
            "OrderSpec::given A and B, then b leaf",
            "OrderSpec::given sibling, then sibling leaf",
        ]
    );
    assert_eq!(collector.failed(), 0);

    case.with_state(|world| {
        assert_eq!(
            world.events,
            [
                // a leaf: own context only
                "su A", "body a", "td A",
                // b leaf: ancestor set_ups first, tear_downs mirrored
                "su A", "su B", "body b", "td B", "td A",
                // sibling subtree strictly after A's subtree
                "su sib", "body sib", "td sib",
            ]
        );
    })
    .expect("state is free after the run");
}

struct FailingSpec;

impl RootSpec for FailingSpec {
    type State = World;

    fn initial_state(&self) -> World {
        World::default()
    }

    fn spec(&self, cx: &mut ContextBuilder<'_, World>) {
        cx.given("a flaky context", |cx| {
            cx.then("first", push("first"));
            cx.then("second", |_| panic!("deliberate failure"));
            cx.then("third", push("third"));
            cx.given("a nested context", |cx| {
                cx.then("fourth", push("fourth"));
            });
        });
    }
}

/// A failing leaf is reported against exactly that leaf and never stops
/// siblings or nested contexts from running.
#[test]
fn one_failing_leaf_does_not_stop_the_walk() {
    let case = TestCase::new(FailingSpec).expect("valid spec");
    let mut collector = RecordingCollector::new();
    case.run(&mut collector);

    assert_eq!(collector.records.len(), 4);
    assert_eq!(collector.passed(), 3);
    assert_eq!(
        collector.records[1],
        (
            "FailingSpec::given a flaky context, then second".to_string(),
            Outcome::Failed("deliberate failure".to_string()),
        )
    );

    case.with_state(|world| {
        assert_eq!(world.events, ["first", "third", "fourth"]);
    })
    .expect("state is free after the run");
}

struct DuplicateSpec;

impl RootSpec for DuplicateSpec {
    type State = World;

    fn initial_state(&self) -> World {
        World::default()
    }

    fn spec(&self, cx: &mut ContextBuilder<'_, World>) {
        cx.given("duplicates", |cx| {
            cx.then("dup", push("first registration"));
            cx.then("other", push("other"));
            cx.then("dup", push("second registration"));
        });
    }
}

/// Re-declaring a then name replaces the body but keeps the original
/// position in the execution order.
#[test]
fn duplicate_then_overwrites_and_keeps_position() {
    let case = TestCase::new(DuplicateSpec).expect("valid spec");
    assert_eq!(case.count(), 2);

    let mut collector = RecordingCollector::new();
    case.run(&mut collector);

    assert_eq!(
        collector.names(),
        [
            "DuplicateSpec::given duplicates, then dup",
            "DuplicateSpec::given duplicates, then other",
        ]
    );
    case.with_state(|world| {
        assert_eq!(world.events, ["second registration", "other"]);
    })
    .expect("state is free after the run");
}

/// State shape for the reentrancy check: the leaf body can reach the case
/// it belongs to and try to run it again mid-leaf.
#[derive(Default)]
struct Reentrant {
    case: Rc<RefCell<Option<Rc<TestCase<Reentrant>>>>>,
}

struct ReentrantSpec;

impl RootSpec for ReentrantSpec {
    type State = Reentrant;

    fn initial_state(&self) -> Reentrant {
        Reentrant::default()
    }

    fn spec(&self, cx: &mut ContextBuilder<'_, Reentrant>) {
        cx.given("a run in progress", |cx| {
            cx.then("running again fails to bind the state", |s| {
                let case = s.case.borrow().clone().expect("case installed");
                let mut inner = RecordingCollector::new();
                case.run(&mut inner);
                // The outer invocation holds the shared state, so every
                // inner leaf fails with the binding defect.
                assert_eq!(inner.records.len(), 1);
                assert_eq!(inner.passed(), 0);
                let (_, outcome) = &inner.records[0];
                match outcome {
                    Outcome::Failed(message) => assert!(message.contains("unavailable")),
                    Outcome::Passed => panic!("inner leaf must not bind the state"),
                }
            });
        });
    }
}

/// Binding the shared state while an enclosing invocation holds it fails
/// loudly, scoped to the inner leaf; the outer walk is unaffected.
#[test]
fn reentrant_run_fails_only_the_inner_leaves() {
    let case = Rc::new(TestCase::new(ReentrantSpec).expect("valid spec"));
    let slot = case
        .with_state(|s| Rc::clone(&s.case))
        .expect("state is free");
    *slot.borrow_mut() = Some(Rc::clone(&case));

    let mut collector = RecordingCollector::new();
    case.run(&mut collector);

    assert_eq!(collector.records.len(), 1);
    assert_eq!(collector.failed(), 0, "records: {:?}", collector.records);
}
