use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gpui_sortable::{
    DragEvent, DragHost, GestureStart, ItemDragController, ItemGeometry, ListReorderCoordinator,
    PointerCapture, PointerKind, Position, Rect, SortEvent, SortableConfig, Subscription,
};
use proptest::prelude::*;

#[derive(Default)]
struct Overlay {
    ghosts_created: usize,
    ghosts_removed: usize,
    live_ghost: Option<Rect>,
    timers: Vec<Duration>,
    cancelled: usize,
}

impl DragHost for Overlay {
    type Ghost = ();
    type Timer = usize;

    fn create_ghost(&mut self, rect: Rect, _z_index: u32) {
        self.ghosts_created += 1;
        self.live_ghost = Some(rect);
    }

    fn move_ghost(&mut self, _ghost: &mut (), rect: Rect) {
        self.live_ghost = Some(rect);
    }

    fn remove_ghost(&mut self, _ghost: ()) {
        self.ghosts_removed += 1;
        self.live_ghost = None;
    }

    fn schedule_activation(&mut self, delay: Duration) -> usize {
        self.timers.push(delay);
        self.timers.len() - 1
    }

    fn cancel_activation(&mut self, _timer: usize) {
        self.cancelled += 1;
    }
}

struct Cellular(Cell<Rect>);

impl ItemGeometry for Cellular {
    fn bounds(&self) -> Rect {
        self.0.get()
    }
}

/// A vertical list of equal rows whose owner applies every sort event and lays
/// the rows out again, like a list view re-rendering after a swap.
struct Harness {
    keys: Vec<&'static str>,
    geometry: Vec<Rc<Cellular>>,
    row_height: f32,
    coordinator: Rc<RefCell<ListReorderCoordinator<&'static str>>>,
    controllers: Vec<ItemDragController<Overlay>>,
    events: Rc<RefCell<Vec<SortEvent>>>,
    drag_events: Rc<RefCell<Vec<DragEvent>>>,
    _subscriptions: Vec<Subscription>,
}

impl Harness {
    fn column(keys: &[&'static str], row_height: f32) -> Self {
        let capture = PointerCapture::new();
        let coordinator = Rc::new(RefCell::new(ListReorderCoordinator::new(
            SortableConfig::default(),
        )));
        let events = Rc::new(RefCell::new(Vec::new()));
        let drag_events = Rc::new(RefCell::new(Vec::new()));
        let mut subscriptions = vec![coordinator.borrow().subscribe({
            let events = Rc::clone(&events);
            move |event| events.borrow_mut().push(*event)
        })];

        let mut controllers = Vec::new();
        for key in keys {
            let controller = ItemDragController::new(SortableConfig::default(), capture.clone());
            subscriptions.push(ListReorderCoordinator::connect(
                &coordinator,
                *key,
                &controller,
            ));
            subscriptions.push(controller.subscribe({
                let drag_events = Rc::clone(&drag_events);
                move |event| drag_events.borrow_mut().push(*event)
            }));
            controllers.push(controller);
        }

        let geometry = keys
            .iter()
            .map(|_| Rc::new(Cellular(Cell::new(Rect::default()))))
            .collect();

        let mut harness = Self {
            keys: keys.to_vec(),
            geometry,
            row_height,
            coordinator,
            controllers,
            events,
            drag_events,
            _subscriptions: subscriptions,
        };
        harness.relayout();
        harness
    }

    fn relayout(&mut self) {
        for (ix, geometry) in self.geometry.iter().enumerate() {
            geometry.0.set(Rect::from_origin_size(
                0.,
                ix as f32 * self.row_height,
                100.,
                self.row_height,
            ));
        }
        let items: Vec<(&'static str, Rc<dyn ItemGeometry>)> = self
            .keys
            .iter()
            .zip(&self.geometry)
            .map(|(key, geometry)| (*key, Rc::clone(geometry) as Rc<dyn ItemGeometry>))
            .collect();
        self.coordinator.borrow_mut().set_items(items);
    }

    fn controller_ix(&self, key: &str) -> usize {
        self.keys.iter().position(|k| *k == key).unwrap()
    }

    fn start(&mut self, key: &str, input: GestureStart, overlay: &mut Overlay) {
        let ix = self.controller_ix(key);
        let geometry = Rc::clone(&self.geometry[ix]);
        self.controllers[ix].gesture_start(input, geometry.as_ref(), overlay);
    }

    /// Move the pointer, then apply whatever sort event came out of it.
    fn drag_to(&mut self, key: &str, position: Position, overlay: &mut Overlay) -> Option<SortEvent> {
        let ix = self.controller_ix(key);
        let before = self.events.borrow().len();
        self.controllers[ix].gesture_move(position, overlay);

        let emitted: Vec<SortEvent> = self.events.borrow()[before..].to_vec();
        assert!(emitted.len() <= 1, "at most one sort event per move");
        let event = emitted.first().copied()?;

        assert_ne!(event.current_index, event.new_index);
        assert!(event.current_index < self.keys.len());
        assert!(event.new_index < self.keys.len());
        assert!(event.apply_swap(&mut self.keys));
        assert!(event.apply_swap(&mut self.geometry));
        assert!(event.apply_swap(&mut self.controllers));
        self.relayout();
        Some(event)
    }

    fn end(&mut self, key: &str, overlay: &mut Overlay) {
        let ix = self.controller_ix(key);
        self.controllers[ix].gesture_end(overlay);
    }
}

#[test]
fn mouse_click_without_movement_starts_and_ends_drag() {
    let mut overlay = Overlay::default();
    let mut harness = Harness::column(&["A", "B", "C"], 10.);

    harness.start("A", GestureStart::mouse(Position::new(5., 5.)), &mut overlay);
    harness.end("A", &mut overlay);

    assert_eq!(overlay.ghosts_created, 1);
    assert_eq!(overlay.ghosts_removed, 1);
    assert!(overlay.live_ghost.is_none());
    assert_eq!(
        *harness.drag_events.borrow(),
        vec![
            DragEvent::Start {
                kind: PointerKind::Mouse,
                position: Position::new(5., 5.)
            },
            DragEvent::End
        ]
    );
    assert!(harness.events.borrow().is_empty());
}

#[test]
fn quick_tap_never_creates_ghost() {
    let mut overlay = Overlay::default();
    let mut harness = Harness::column(&["A", "B"], 10.);

    harness.start("B", GestureStart::touch(Position::new(5., 15.)), &mut overlay);
    harness.end("B", &mut overlay);

    assert_eq!(overlay.timers, vec![Duration::from_millis(200)]);
    assert_eq!(overlay.cancelled, 1);
    assert_eq!(overlay.ghosts_created, 0);
    assert!(harness.drag_events.borrow().is_empty());
}

#[test]
fn touch_hold_then_drag_reorders() {
    let mut overlay = Overlay::default();
    let mut harness = Harness::column(&["A", "B", "C"], 10.);

    harness.start("C", GestureStart::touch(Position::new(5., 25.)), &mut overlay);
    let ix = harness.controller_ix("C");
    harness.controllers[ix].activation_elapsed(&mut overlay);
    assert_eq!(overlay.ghosts_created, 1);

    let event = harness.drag_to("C", Position::new(5., 19.), &mut overlay);
    assert_eq!(
        event,
        Some(SortEvent {
            current_index: 2,
            new_index: 1
        })
    );
    assert_eq!(harness.keys, vec!["A", "C", "B"]);

    harness.end("C", &mut overlay);
    assert_eq!(overlay.ghosts_removed, 1);
}

#[test]
fn dragging_first_row_down_walks_one_slot_at_a_time() {
    let mut overlay = Overlay::default();
    let mut harness = Harness::column(&["A", "B", "C"], 10.);

    harness.start("A", GestureStart::mouse(Position::new(5., 5.)), &mut overlay);
    // Ghost top 21 / bottom 31: B is nearest and already crossed.
    let first = harness.drag_to("A", Position::new(5., 26.), &mut overlay);
    assert_eq!(
        first,
        Some(SortEvent {
            current_index: 0,
            new_index: 1
        })
    );

    // Same pointer position after re-layout: A sits at 10..20, C's center is 25.
    let second = harness.drag_to("A", Position::new(5., 26.), &mut overlay);
    assert_eq!(
        second,
        Some(SortEvent {
            current_index: 1,
            new_index: 2
        })
    );
    assert_eq!(harness.keys, vec!["B", "C", "A"]);

    // Settled: nothing left to cross.
    assert_eq!(harness.drag_to("A", Position::new(5., 26.), &mut overlay), None);
    assert_eq!(harness.drag_to("A", Position::new(5., 26.), &mut overlay), None);
    harness.end("A", &mut overlay);
}

#[test]
fn owner_may_update_coordinator_from_sort_listener() {
    let geometry: Vec<Rc<Cellular>> = (0..2)
        .map(|ix| {
            Rc::new(Cellular(Cell::new(Rect::from_origin_size(
                0.,
                ix as f32 * 10.,
                100.,
                10.,
            ))))
        })
        .collect();
    let coordinator = Rc::new(RefCell::new(ListReorderCoordinator::new(
        SortableConfig::default(),
    )));
    let order = Rc::new(RefCell::new(vec!["a", "b"]));
    let sync = {
        let geometry = geometry.clone();
        move |order: &[&'static str]| -> Vec<(&'static str, Rc<dyn ItemGeometry>)> {
            order
                .iter()
                .map(|key| {
                    let ix = if *key == "a" { 0 } else { 1 };
                    (*key, Rc::clone(&geometry[ix]) as Rc<dyn ItemGeometry>)
                })
                .collect()
        }
    };
    coordinator.borrow_mut().set_items(sync(&order.borrow()));

    let _listener = coordinator.borrow().subscribe({
        let coordinator = Rc::downgrade(&coordinator);
        let order = Rc::clone(&order);
        move |event| {
            event.apply_swap(order.borrow_mut().as_mut_slice());
            if let Some(coordinator) = coordinator.upgrade() {
                coordinator.borrow_mut().set_items(sync(&order.borrow()));
            }
        }
    });

    let mut overlay = Overlay::default();
    let mut controller = ItemDragController::new(SortableConfig::default(), PointerCapture::new());
    let _wire = ListReorderCoordinator::connect(&coordinator, "a", &controller);

    controller.gesture_start(
        GestureStart::mouse(Position::new(0., 0.)),
        geometry[0].as_ref(),
        &mut overlay,
    );
    controller.gesture_move(Position::new(0., 6.), &mut overlay);

    assert_eq!(*order.borrow(), vec!["b", "a"]);
    assert_eq!(coordinator.borrow().index_of(&"a"), Some(1));
}

proptest! {
    #[test]
    fn monotonic_drag_emits_adjacent_swaps(
        len in 2usize..8,
        start in 0usize..8,
        steps in prop::collection::vec(0.0f32..25.0, 1..40),
        downward in any::<bool>(),
    ) {
        let keys: Vec<&'static str> = ["a", "b", "c", "d", "e", "f", "g", "h"][..len].to_vec();
        let start = start % len;
        let key = keys[start];

        let mut overlay = Overlay::default();
        let mut harness = Harness::column(&keys, 10.);
        let origin = Position::new(50., start as f32 * 10. + 5.);
        harness.start(key, GestureStart::mouse(origin), &mut overlay);

        let mut offset = 0.;
        for step in steps {
            offset += step;
            let y = if downward { origin.y + offset } else { origin.y - offset };
            if let Some(event) = harness.drag_to(key, Position::new(origin.x, y), &mut overlay) {
                prop_assert_eq!(event.current_index.abs_diff(event.new_index), 1);
                if downward {
                    prop_assert!(event.new_index > event.current_index);
                } else {
                    prop_assert!(event.new_index < event.current_index);
                }
            }
        }

        harness.end(key, &mut overlay);
        prop_assert!(overlay.live_ghost.is_none());
    }
}
