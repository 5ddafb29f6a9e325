// Click and hover state for the star and ornaments.
//
// The document cursor is shared by everything on the page, so it is only
// ever changed through a `CursorGuard`: acquiring one shows the pointer
// cursor and dropping it restores the default, whichever path the hover
// ends by.

use super::animate::TreeRig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

/// Whatever owns the visible cursor (the document body on the web).
pub trait CursorSink {
    fn set_cursor(&self, cursor: Cursor);
}

/// Holds the pointer cursor for as long as it lives.
pub struct CursorGuard<S: CursorSink> {
    sink: S,
}

impl<S: CursorSink> CursorGuard<S> {
    pub fn acquire(sink: S) -> Self {
        sink.set_cursor(Cursor::Pointer);
        Self { sink }
    }
}

impl<S: CursorSink> Drop for CursorGuard<S> {
    fn drop(&mut self) {
        self.sink.set_cursor(Cursor::Default);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    Star,
    Ornament(usize),
}

/// The hover transition produced by one pointer update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub left: Option<PickTarget>,
    pub entered: Option<PickTarget>,
}

impl HoverChange {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Tracks the single hovered object (the nearest one under the pointer).
pub struct HoverTracker<S: CursorSink + Clone> {
    sink: S,
    current: Option<(PickTarget, CursorGuard<S>)>,
}

impl<S: CursorSink + Clone> HoverTracker<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current: None,
        }
    }

    pub fn hovered(&self) -> Option<PickTarget> {
        self.current.as_ref().map(|(t, _)| *t)
    }

    /// Move the hover to `target` (the nearest hit, or `None` for no hit).
    pub fn update(&mut self, target: Option<PickTarget>) -> HoverChange {
        if self.hovered() == target {
            return HoverChange::default();
        }
        // release before acquiring so the old guard cannot reset the new cursor
        let left = self.current.take().map(|(t, _guard)| t);
        let entered = target.map(|t| {
            self.current = Some((t, CursorGuard::acquire(self.sink.clone())));
            t
        });
        HoverChange { left, entered }
    }

    /// Drop any hover, e.g. when the pointer leaves the canvas.
    pub fn clear(&mut self) -> HoverChange {
        self.update(None)
    }
}

/// Reflect a hover transition into the rig's per-object flags.
pub fn apply_hover(rig: &mut TreeRig, change: HoverChange) {
    let mut set = |target: PickTarget, value: bool| match target {
        PickTarget::Star => rig.star.hovered = value,
        PickTarget::Ornament(i) => {
            if let Some(o) = rig.ornaments.get_mut(i) {
                o.hovered = value;
            }
        }
    };
    if let Some(t) = change.left {
        set(t, false);
    }
    if let Some(t) = change.entered {
        set(t, true);
    }
}

/// The one persistent interaction flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StarToggle {
    pub active: bool,
}

impl StarToggle {
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }
}

/// Global keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMusic,
    ToggleHud,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "m" | "M" => Some(KeyAction::ToggleMusic),
        "h" | "H" => Some(KeyAction::ToggleHud),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Cursor>>>);

    impl CursorSink for Recorder {
        fn set_cursor(&self, cursor: Cursor) {
            self.0.borrow_mut().push(cursor);
        }
    }

    #[test]
    fn same_target_twice_is_not_a_change() {
        let rec = Recorder::default();
        let mut hover = HoverTracker::new(rec.clone());
        assert!(!hover.update(Some(PickTarget::Star)).is_empty());
        assert!(hover.update(Some(PickTarget::Star)).is_empty());
        assert_eq!(rec.0.borrow().as_slice(), &[Cursor::Pointer]);
    }

    #[test]
    fn star_toggle_flips() {
        let mut s = StarToggle::default();
        assert!(s.toggle());
        assert!(!s.toggle());
    }
}
