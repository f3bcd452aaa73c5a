//! Turns a dragged item's ghost rectangle into discrete swap decisions.
//!
//! On every ghost move the coordinator re-measures all items, scans the other
//! items nearest-first and emits a [`SortEvent`] for the first one the ghost has
//! crossed. It never reorders anything itself: the list owner applies the event
//! to its backing collection and hands the new order back via
//! [`ListReorderCoordinator::set_items`].

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::SortableConfig;
use crate::controller::{DragEvent, DragHost, ItemDragController, ItemGeometry};
use crate::events::{Emitter, Subscription};
use crate::geometry::Rect;

/// A proposed swap of two positions in the ordered list.
///
/// `current_index != new_index`, and both were valid indices into the list the
/// coordinator measured when the event was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortEvent {
    pub current_index: usize,
    pub new_index: usize,
}

impl SortEvent {
    /// Swap the two entries in place. Returns `false` (and leaves `items` alone)
    /// when either index is out of range.
    pub fn apply_swap<T>(&self, items: &mut [T]) -> bool {
        if self.current_index >= items.len() || self.new_index >= items.len() {
            return false;
        }
        items.swap(self.current_index, self.new_index);
        true
    }
}

struct SortableEntry<K> {
    key: K,
    geometry: Rc<dyn ItemGeometry>,
}

pub struct ListReorderCoordinator<K> {
    config: SortableConfig,
    items: Vec<SortableEntry<K>>,
    sort: Emitter<SortEvent>,
}

impl<K: Debug> Debug for ListReorderCoordinator<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListReorderCoordinator")
            .field(
                "items",
                &self.items.iter().map(|entry| &entry.key).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<K> ListReorderCoordinator<K>
where
    K: Clone + PartialEq + Debug + 'static,
{
    pub fn new(config: SortableConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            sort: Emitter::new(),
        }
    }

    pub fn set_config(&mut self, config: SortableConfig) {
        self.config = config;
    }

    /// Replace the ordered snapshot. Call whenever membership or order changes.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = (K, Rc<dyn ItemGeometry>)>) {
        self.items = items
            .into_iter()
            .map(|(key, geometry)| SortableEntry { key, geometry })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.items.iter().position(|entry| entry.key == *key)
    }

    pub fn subscribe(&self, listener: impl Fn(&SortEvent) + 'static) -> Subscription {
        self.sort.subscribe(listener)
    }

    /// A fresh measurement of every item, in list order.
    pub fn measure(&self) -> Vec<Rect> {
        self.items.iter().map(|entry| entry.geometry.bounds()).collect()
    }

    /// Decide whether the ghost of `key` should swap with a neighbor, without
    /// notifying subscribers.
    pub fn decide(&self, key: &K, ghost: Rect) -> Option<SortEvent> {
        let current_index = self.index_of(key)?;
        let rects = self.measure();
        let new_index = find_swap_target_where(&rects, current_index, ghost, &self.config, |ix| {
            !self.items[ix].geometry.is_pinned()
        })?;
        Some(SortEvent {
            current_index,
            new_index,
        })
    }

    /// Run [`Self::decide`] and publish the result.
    pub fn on_drag_move(&self, key: &K, ghost: Rect) -> Option<SortEvent> {
        let event = self.decide(key, ghost)?;
        debug!(?key, ?event, "sort");
        self.sort.emit(&event);
        Some(event)
    }

    /// Subscribe `coordinator` to the move events of the item `key`.
    ///
    /// The subscription only holds a weak reference. Sort listeners run after the
    /// coordinator borrow is released, so they may call [`Self::set_items`].
    pub fn connect<H: DragHost>(
        coordinator: &Rc<RefCell<Self>>,
        key: K,
        controller: &ItemDragController<H>,
    ) -> Subscription {
        let coordinator = Rc::downgrade(coordinator);
        controller.subscribe(move |event| {
            let DragEvent::Move(ghost) = event else {
                return;
            };
            let Some(coordinator) = coordinator.upgrade() else {
                return;
            };

            let (event, sort) = {
                let coordinator = coordinator.borrow();
                (coordinator.decide(&key, *ghost), coordinator.sort.clone())
            };
            if let Some(event) = event {
                debug!(?key, ?event, "sort");
                sort.emit(&event);
            }
        })
    }
}

/// Index of the item the ghost of `rects[current_index]` should swap with.
///
/// Candidates are scanned by ascending distance between top-left corners;
/// equidistant candidates keep ascending index order.
pub fn find_swap_target(
    rects: &[Rect],
    current_index: usize,
    ghost: Rect,
    config: &SortableConfig,
) -> Option<usize> {
    find_swap_target_where(rects, current_index, ghost, config, |_| true)
}

/// [`find_swap_target`] restricted to the indices `eligible` accepts.
fn find_swap_target_where(
    rects: &[Rect],
    current_index: usize,
    ghost: Rect,
    config: &SortableConfig,
    eligible: impl Fn(usize) -> bool,
) -> Option<usize> {
    let current = rects.get(current_index)?;

    let mut candidates: Vec<(usize, f32)> = rects
        .iter()
        .enumerate()
        .filter(|(ix, _)| *ix != current_index && eligible(*ix))
        .map(|(ix, rect)| (ix, rect.origin_distance(current)))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

    candidates.into_iter().map(|(ix, _)| ix).find(|&ix| {
        let hit = crosses(&rects[ix], current, &ghost, config);
        trace!(candidate = ix, hit, "swap candidate");
        hit
    })
}

fn crosses(candidate: &Rect, current: &Rect, ghost: &Rect, config: &SortableConfig) -> bool {
    let is_horizontal = (candidate.top - current.top).abs() <= config.row_tolerance;
    let is_before = if is_horizontal {
        candidate.left < current.left
    } else {
        candidate.top < current.top
    };

    match (is_before, is_horizontal) {
        (true, true) => ghost.left + config.horizontal_hysteresis < candidate.center_x(),
        (true, false) => ghost.top < candidate.center_y(),
        (false, true) => ghost.right > candidate.center_x(),
        (false, false) => ghost.bottom > candidate.center_y(),
    }
}
