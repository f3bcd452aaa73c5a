use std::cell::Cell;
use std::rc::Rc;

/// The list-wide "active drag" slot.
///
/// Every controller of one list shares a clone. A controller must hold the
/// [`CaptureGuard`] while it is dragging, which keeps at most one drag session
/// active per list. Hosts attach their window-level move/up listeners only while
/// [`PointerCapture::is_held`] is true.
#[derive(Clone, Debug, Default)]
pub struct PointerCapture {
    held: Rc<Cell<bool>>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<CaptureGuard> {
        if self.held.replace(true) {
            return None;
        }
        Some(CaptureGuard {
            held: Rc::clone(&self.held),
        })
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }
}

/// Releases the [`PointerCapture`] when dropped.
#[derive(Debug)]
pub struct CaptureGuard {
    held: Rc<Cell<bool>>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.held.set(false);
    }
}
