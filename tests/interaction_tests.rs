// Host-side tests for hover tracking, the cursor guard and key bindings.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod animate {
        include!("../src/core/animate.rs");
    }
    pub mod interaction {
        include!("../src/core/interaction.rs");
    }
}

use crate::core::animate::TreeRig;
use crate::core::interaction::*;
use crate::core::params::SceneLayout;
use crate::core::scene::SceneConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct FakeBody(Rc<RefCell<Vec<Cursor>>>);

impl FakeBody {
    fn current(&self) -> Cursor {
        self.0.borrow().last().copied().unwrap_or(Cursor::Default)
    }
}

impl CursorSink for FakeBody {
    fn set_cursor(&self, cursor: Cursor) {
        self.0.borrow_mut().push(cursor);
    }
}

fn rig() -> TreeRig {
    let config = SceneConfig::christmas();
    let layout = SceneLayout::generate(&mut StdRng::seed_from_u64(8));
    let mut rig = TreeRig::new(&config, &layout);
    rig.mount(&config);
    rig
}

#[test]
fn hover_enter_and_leave_restore_the_cursor() {
    let body = FakeBody::default();
    let mut hover = HoverTracker::new(body.clone());
    let mut rig = rig();

    let change = hover.update(Some(PickTarget::Star));
    apply_hover(&mut rig, change);
    assert!(rig.star.hovered);
    assert_eq!(body.current(), Cursor::Pointer);

    let change = hover.update(None);
    assert_eq!(change.left, Some(PickTarget::Star));
    apply_hover(&mut rig, change);
    assert!(!rig.star.hovered);
    assert_eq!(body.current(), Cursor::Default);
}

#[test]
fn switching_objects_keeps_the_pointer_cursor() {
    let body = FakeBody::default();
    let mut hover = HoverTracker::new(body.clone());
    let mut rig = rig();

    apply_hover(&mut rig, hover.update(Some(PickTarget::Ornament(2))));
    let change = hover.update(Some(PickTarget::Ornament(5)));
    assert_eq!(change.left, Some(PickTarget::Ornament(2)));
    assert_eq!(change.entered, Some(PickTarget::Ornament(5)));
    apply_hover(&mut rig, change);

    assert!(!rig.ornaments[2].hovered);
    assert!(rig.ornaments[5].hovered);
    assert_eq!(body.current(), Cursor::Pointer);
    assert_eq!(
        body.0.borrow().as_slice(),
        &[Cursor::Pointer, Cursor::Default, Cursor::Pointer]
    );
}

#[test]
fn clearing_releases_the_cursor() {
    let body = FakeBody::default();
    let mut hover = HoverTracker::new(body.clone());
    hover.update(Some(PickTarget::Ornament(0)));
    let change = hover.clear();
    assert_eq!(change.left, Some(PickTarget::Ornament(0)));
    assert_eq!(hover.hovered(), None);
    assert_eq!(body.current(), Cursor::Default);
    assert!(hover.clear().is_empty());
}

#[test]
fn dropping_the_tracker_restores_the_cursor() {
    let body = FakeBody::default();
    {
        let mut hover = HoverTracker::new(body.clone());
        hover.update(Some(PickTarget::Star));
        assert_eq!(body.current(), Cursor::Pointer);
    }
    assert_eq!(body.current(), Cursor::Default);
}

#[test]
fn out_of_range_ornament_is_ignored() {
    let mut rig = rig();
    apply_hover(
        &mut rig,
        HoverChange {
            left: None,
            entered: Some(PickTarget::Ornament(10_000)),
        },
    );
    assert!(rig.ornaments.iter().all(|o| !o.hovered));
}

#[test]
fn key_bindings() {
    assert_eq!(action_for_key("m"), Some(KeyAction::ToggleMusic));
    assert_eq!(action_for_key("M"), Some(KeyAction::ToggleMusic));
    assert_eq!(action_for_key("h"), Some(KeyAction::ToggleHud));
    assert_eq!(action_for_key("H"), Some(KeyAction::ToggleHud));
    assert_eq!(action_for_key("x"), None);
    assert_eq!(action_for_key("Enter"), None);
}
