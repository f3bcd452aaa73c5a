//! Per-item drag gesture state machine.
//!
//! [`ItemDragController`] turns raw pointer input on one item into a drag
//! lifecycle and a ghost that follows the pointer:
//!
//! ```text
//! Idle ── mouse down ───────────────────────────────▶ Dragging ── up ──▶ Idle
//! Idle ── touch start ──▶ PendingActivation ── delay ──▶ Dragging ── end ──▶ Idle
//!                              │
//!                              └── touch move / end before delay ──▶ Idle (no drag)
//! ```
//!
//! Visual and timer side effects go through a [`DragHost`]; geometry is read
//! through [`ItemGeometry`]. Drag events are published on an [`Emitter`].

use std::time::Duration;

use tracing::{debug, trace};

use crate::capture::{CaptureGuard, PointerCapture};
use crate::config::SortableConfig;
use crate::events::{Emitter, Subscription};
use crate::geometry::{Margins, Position, Rect};

/// Source of a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// A pointer-down or touch-start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureStart {
    pub kind: PointerKind,
    pub position: Position,
}

impl GestureStart {
    pub fn mouse(position: Position) -> Self {
        Self {
            kind: PointerKind::Mouse,
            position,
        }
    }

    pub fn touch(position: Position) -> Self {
        Self {
            kind: PointerKind::Touch,
            position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    Start {
        kind: PointerKind,
        position: Position,
    },
    /// The ghost's current rectangle.
    Move(Rect),
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    PendingActivation,
    Dragging,
}

/// Whether the host should suppress the platform's default handling of the input
/// (text selection, native drag, scrolling).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResponse {
    PreventDefault,
    Ignored,
}

/// Live layout of one item.
pub trait ItemGeometry {
    /// The item's current border box.
    fn bounds(&self) -> Rect;

    fn margins(&self) -> Margins {
        Margins::default()
    }

    /// Pinned items keep their position: they are never chosen as a swap target.
    fn is_pinned(&self) -> bool {
        false
    }
}

/// Visual overlay and timer capabilities a controller needs from its host.
pub trait DragHost {
    type Ghost;
    type Timer;

    /// Create a detached clone of the item at `rect`, stacked at `z_index` above
    /// the page.
    fn create_ghost(&mut self, rect: Rect, z_index: u32) -> Self::Ghost;
    fn move_ghost(&mut self, ghost: &mut Self::Ghost, rect: Rect);
    fn remove_ghost(&mut self, ghost: Self::Ghost);

    /// Arrange for [`ItemDragController::activation_elapsed`] to be called after
    /// `delay`.
    fn schedule_activation(&mut self, delay: Duration) -> Self::Timer;
    fn cancel_activation(&mut self, timer: Self::Timer);
}

struct DragSession<G, T> {
    kind: PointerKind,
    start_position: Position,
    origin_rect: Rect,
    ghost_rect: Rect,
    ghost: Option<G>,
    activation: Option<T>,
    // Present exactly while dragging.
    capture: Option<CaptureGuard>,
}

pub struct ItemDragController<H: DragHost> {
    config: SortableConfig,
    capture: PointerCapture,
    session: Option<DragSession<H::Ghost, H::Timer>>,
    events: Emitter<DragEvent>,
}

impl<H: DragHost> std::fmt::Debug for ItemDragController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemDragController")
            .field("phase", &self.phase())
            .field("listeners", &self.events.listener_count())
            .finish()
    }
}

impl<H: DragHost> ItemDragController<H> {
    pub fn new(config: SortableConfig, capture: PointerCapture) -> Self {
        Self {
            config,
            capture,
            session: None,
            events: Emitter::new(),
        }
    }

    pub fn set_config(&mut self, config: SortableConfig) {
        self.config = config;
    }

    pub fn subscribe(&self, listener: impl Fn(&DragEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(session) if session.capture.is_some() => DragPhase::Dragging,
            Some(_) => DragPhase::PendingActivation,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    /// The ghost's last rectangle while dragging.
    pub fn ghost_rect(&self) -> Option<Rect> {
        self.session
            .as_ref()
            .filter(|session| session.capture.is_some())
            .map(|session| session.ghost_rect)
    }

    pub fn gesture_start(
        &mut self,
        input: GestureStart,
        geometry: &dyn ItemGeometry,
        host: &mut H,
    ) -> InputResponse {
        if self.session.is_some() {
            self.gesture_end(host);
        }

        let origin_rect = geometry.bounds().without_margins(geometry.margins());
        self.session = Some(DragSession {
            kind: input.kind,
            start_position: input.position,
            origin_rect,
            ghost_rect: origin_rect,
            ghost: None,
            activation: None,
            capture: None,
        });

        match input.kind {
            PointerKind::Mouse => self.activate(host),
            PointerKind::Touch => {
                let delay = self.config.touch_activation_delay();
                let timer = host.schedule_activation(delay);
                if let Some(session) = self.session.as_mut() {
                    session.activation = Some(timer);
                }
                debug!(?delay, "touch hold pending");
            }
        }

        InputResponse::PreventDefault
    }

    /// Called by the host when the timer from [`DragHost::schedule_activation`] fires.
    pub fn activation_elapsed(&mut self, host: &mut H) {
        if self.phase() != DragPhase::PendingActivation {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.activation = None;
        }
        self.activate(host);
    }

    pub fn gesture_move(&mut self, position: Position, host: &mut H) -> InputResponse {
        match self.phase() {
            DragPhase::Idle => InputResponse::Ignored,
            DragPhase::PendingActivation => {
                debug!("touch moved before activation, abandoning");
                self.gesture_end(host);
                InputResponse::Ignored
            }
            DragPhase::Dragging => {
                let Some(session) = self.session.as_mut() else {
                    return InputResponse::Ignored;
                };
                let rect = session.origin_rect.translate(
                    position.x - session.start_position.x,
                    position.y - session.start_position.y,
                );
                session.ghost_rect = rect;
                if let Some(ghost) = session.ghost.as_mut() {
                    host.move_ghost(ghost, rect);
                }
                trace!(left = rect.left, top = rect.top, "drag move");
                self.events.emit(&DragEvent::Move(rect));
                InputResponse::PreventDefault
            }
        }
    }

    pub fn gesture_end(&mut self, host: &mut H) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        if let Some(timer) = session.activation.take() {
            host.cancel_activation(timer);
        }
        if let Some(ghost) = session.ghost.take() {
            host.remove_ghost(ghost);
        }

        let was_dragging = session.capture.is_some();
        drop(session);

        if was_dragging {
            debug!("drag end");
            self.events.emit(&DragEvent::End);
        } else {
            debug!("gesture abandoned before activation");
        }
    }

    /// Tear down any gesture, e.g. when the item leaves the list mid-drag.
    pub fn cancel(&mut self, host: &mut H) {
        self.gesture_end(host);
    }

    fn activate(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(capture) = self.capture.try_acquire() else {
            debug!("another item is already dragging, ignoring gesture");
            self.session = None;
            return;
        };

        session.capture = Some(capture);
        session.ghost = Some(host.create_ghost(session.origin_rect, self.config.ghost_z_index));
        let event = DragEvent::Start {
            kind: session.kind,
            position: session.start_position,
        };
        debug!(kind = ?session.kind, "drag start");
        self.events.emit(&event);
    }
}
