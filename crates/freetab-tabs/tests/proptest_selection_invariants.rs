//! Property-based invariant tests for tab selection.
//!
//! Verifies, over arbitrary operation sequences:
//! 1. Exactly the current button is pressed after every operation
//! 2. Exactly the current view is in the shown state
//! 3. Every successful show-type operation runs exactly one show hook
//! 4. A hide hook runs before a show hook whenever something was selected
//! 5. Out-of-range requests fail and change nothing
//! 6. Next/previous follow the wrap policy

use std::cell::RefCell;
use std::rc::Rc;

use freetab_scene::SceneTree;
use freetab_tabs::{CheckButton, SelectorButton, Selection, TabController, TabError};
use freetab_view::{ViewItem, ViewLifecycle, ViewState};
use proptest::prelude::*;

type Log = Rc<RefCell<Vec<(usize, &'static str)>>>;

struct Recorder {
    index: usize,
    log: Log,
}

impl ViewLifecycle for Recorder {
    type Arg = ();

    fn show(&mut self, _: ()) -> anyhow::Result<()> {
        self.log.borrow_mut().push((self.index, "show"));
        Ok(())
    }

    fn hide(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push((self.index, "hide"));
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Op {
    Show(usize),
    Next(bool),
    Previous(bool),
    Toggle(usize, bool),
}

fn arb_op(len: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..len + 2).prop_map(Op::Show),
        any::<bool>().prop_map(Op::Next),
        any::<bool>().prop_map(Op::Previous),
        (0..len + 2, any::<bool>()).prop_map(|(i, p)| Op::Toggle(i, p)),
    ]
}

fn arb_case() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (1usize..6).prop_flat_map(|len| (Just(len), prop::collection::vec(arb_op(len), 0..40)))
}

fn build(len: usize) -> (TabController, Log) {
    let scene = SceneTree::new();
    let log: Log = Rc::default();
    let views: Vec<ViewItem> = (0..len)
        .map(|index| {
            let node = scene.create_node(format!("view{index}"));
            let recorder = Recorder {
                index,
                log: Rc::clone(&log),
            };
            ViewItem::new(&scene, node, recorder).unwrap()
        })
        .collect();
    let buttons: Vec<Box<dyn SelectorButton>> = (0..len)
        .map(|i| Box::new(CheckButton::new(format!("button{i}"))) as Box<dyn SelectorButton>)
        .collect();

    (TabController::new(views, buttons, None).unwrap(), log)
}

fn expected_target(op: &Op, selection: Selection, len: usize) -> Option<usize> {
    match *op {
        Op::Show(i) | Op::Toggle(i, true) => (i < len).then_some(i),
        Op::Next(wrap) => Some(selection.next(len, wrap)),
        Op::Previous(wrap) => Some(selection.previous(len, wrap)),
        Op::Toggle(_, false) => None,
    }
}

proptest! {
    #[test]
    fn selection_invariants_hold((len, ops) in arb_case()) {
        let (mut controller, log) = build(len);

        for op in ops {
            let before = controller.selection();
            let target = expected_target(&op, before, len);
            log.borrow_mut().clear();

            let result = match op {
                Op::Show(i) => controller.show(i),
                Op::Next(wrap) => controller.show_next(wrap, None),
                Op::Previous(wrap) => controller.show_previous(wrap, None),
                Op::Toggle(i, pressed) => controller.handle_button_toggled(i, pressed).map(|_| ()),
            };

            match (&op, target) {
                (Op::Toggle(i, false), _) => {
                    prop_assert_eq!(result.is_ok(), *i < len);
                    prop_assert_eq!(controller.selection(), before);
                    prop_assert!(log.borrow().is_empty());
                }
                (_, None) => {
                    let is_range_error = matches!(result, Err(TabError::IndexOutOfRange { .. }));
                    prop_assert!(is_range_error);
                    prop_assert_eq!(controller.selection(), before);
                    prop_assert!(log.borrow().is_empty());
                }
                (_, Some(target)) => {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(controller.current(), Some(target));

                    let mut expected = Vec::new();
                    if let Some(previous) = before.index() {
                        expected.push((previous, "hide"));
                    }
                    expected.push((target, "show"));
                    prop_assert_eq!(&*log.borrow(), &expected);
                }
            }

            let current = controller.current();
            for i in 0..len {
                let selected = current == Some(i);
                prop_assert_eq!(controller.button(i).unwrap().is_pressed(), selected);
                let state = controller.view(i).unwrap().state();
                prop_assert_eq!(state == ViewState::Shown, selected);
            }
        }
    }

    #[test]
    fn next_then_previous_returns_when_not_at_an_edge(len in 3usize..8, start in 0usize..8) {
        let start = start % len;
        prop_assume!(start + 1 < len);

        let (mut controller, _) = build(len);
        controller.show(start).unwrap();
        controller.show_next(false, None).unwrap();
        prop_assert_eq!(controller.current(), Some(start + 1));
        controller.show_previous(false, None).unwrap();
        prop_assert_eq!(controller.current(), Some(start));
    }
}
