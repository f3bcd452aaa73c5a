use std::{cell::Cell, cell::RefCell, rc::Rc, time::Duration};

use gpui::{
    AnyElement, App, Bounds, Context, CursorStyle, Element, ElementId, Entity, FocusHandle,
    GlobalElementId, InspectorElementId, InteractiveElement as _, IntoElement, LayoutId,
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, ParentElement as _, Pixels, Point,
    Render, RenderOnce, SharedString, StyleRefinement, Styled, Task, Timer, Window, deferred, div,
    prelude::FluentBuilder as _, px,
};
use gpui_component::{StyledExt as _, h_flex, v_flex};
use tracing::trace;

use crate::capture::PointerCapture;
use crate::config::SortableConfig;
use crate::controller::{
    DragHost, DragPhase, GestureStart, InputResponse, ItemDragController, ItemGeometry,
};
use crate::coordinator::{ListReorderCoordinator, SortEvent};
use crate::events::Subscription;
use crate::geometry::{Margins, Position, Rect};

const CONTEXT: &str = "SortableList";

type RenderItem<T> =
    Rc<dyn Fn(usize, &SortableItem<T>, SortableRowState, &mut Window, &mut App) -> AnyElement>;

/// Create a [`SortableList`].
pub fn sortable_list<T, R>(state: &Entity<SortableListState<T>>, render_item: R) -> SortableList<T>
where
    T: 'static,
    R: Fn(usize, &SortableItem<T>, SortableRowState, &mut Window, &mut App) -> AnyElement
        + 'static,
{
    SortableList::new(state, render_item)
}

/// A single item in a [`SortableListState`].
#[derive(Clone)]
pub struct SortableItem<T> {
    pub id: SharedString,
    pub label: SharedString,
    pub data: T,
    disabled: bool,
}

impl<T> SortableItem<T> {
    pub fn new(id: impl Into<SharedString>, label: impl Into<SharedString>, data: T) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data,
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SortableRowState {
    /// The row's item is being dragged; its ghost is on screen.
    pub dragging: bool,
    /// This render is the floating ghost, not the row in the list.
    pub ghost: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortableLayout {
    /// One item per line.
    #[default]
    Column,
    /// Items flow left to right and wrap into rows.
    Wrap,
}

/// Row geometry as of the last prepaint.
struct RowGeometry {
    bounds: Cell<Rect>,
    margins: Cell<Margins>,
    // Disabled rows stay where they are.
    pinned: bool,
}

impl RowGeometry {
    fn new(margin: Pixels, pinned: bool) -> Self {
        Self {
            bounds: Cell::new(Rect::default()),
            margins: Cell::new(Margins::uniform(f32::from(margin))),
            pinned,
        }
    }
}

impl ItemGeometry for RowGeometry {
    fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    fn margins(&self) -> Margins {
        self.margins.get()
    }

    fn is_pinned(&self) -> bool {
        self.pinned
    }
}

#[derive(Debug, PartialEq, Eq)]
struct GhostId(u64);

#[derive(Debug, PartialEq, Eq)]
struct ActivationTimer(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
struct GhostOverlay {
    id: u64,
    rect: Rect,
    z_index: u32,
}

/// The list's side of [`DragHost`]: the ghost is state the list renders, and
/// timers are spawned as gpui tasks once the controller call returns.
#[derive(Default)]
struct OverlayHost {
    next_id: u64,
    ghost: Option<GhostOverlay>,
    requested: Vec<(u64, Duration)>,
    timers: Vec<(u64, Task<()>)>,
}

impl OverlayHost {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Forget a timer that fired. Returns `false` if it was cancelled meanwhile.
    fn finish_timer(&mut self, timer_id: u64) -> bool {
        let Some(ix) = self.timers.iter().position(|(id, _)| *id == timer_id) else {
            return false;
        };
        let (_, task) = self.timers.remove(ix);
        task.detach();
        true
    }
}

impl DragHost for OverlayHost {
    type Ghost = GhostId;
    type Timer = ActivationTimer;

    fn create_ghost(&mut self, rect: Rect, z_index: u32) -> GhostId {
        let id = self.next_id();
        self.ghost = Some(GhostOverlay { id, rect, z_index });
        GhostId(id)
    }

    fn move_ghost(&mut self, ghost: &mut GhostId, rect: Rect) {
        if let Some(overlay) = self.ghost.as_mut().filter(|overlay| overlay.id == ghost.0) {
            overlay.rect = rect;
        }
    }

    fn remove_ghost(&mut self, ghost: GhostId) {
        if self.ghost.is_some_and(|overlay| overlay.id == ghost.0) {
            self.ghost = None;
        }
    }

    fn schedule_activation(&mut self, delay: Duration) -> ActivationTimer {
        let id = self.next_id();
        self.requested.push((id, delay));
        ActivationTimer(id)
    }

    fn cancel_activation(&mut self, timer: ActivationTimer) {
        self.requested.retain(|(id, _)| *id != timer.0);
        // Dropping the task cancels it.
        self.timers.retain(|(id, _)| *id != timer.0);
    }
}

struct ItemSlot {
    geometry: Rc<RowGeometry>,
    controller: ItemDragController<OverlayHost>,
    _move_subscription: Subscription,
}

struct SortableListCallbacks<T> {
    on_sort: Option<Rc<dyn Fn(&SortEvent, &[SortableItem<T>])>>,
}

impl<T> Default for SortableListCallbacks<T> {
    fn default() -> Self {
        Self { on_sort: None }
    }
}

/// State for a list whose items reorder live while one of them is dragged.
///
/// Mouse input is wired by the list itself. gpui delivers no touch events, so
/// platform glue that receives them (a touch-enabled window shell or an
/// embedding host) forwards them through [`Self::touch_start`],
/// [`Self::touch_move`] and [`Self::touch_end`].
///
/// Disabled items cannot be dragged and are never displaced by a drag.
pub struct SortableListState<T> {
    focus_handle: FocusHandle,
    items: Vec<SortableItem<T>>,
    slots: Vec<ItemSlot>,
    config: SortableConfig,
    layout: SortableLayout,
    gap: Pixels,
    item_margin: Pixels,
    capture: PointerCapture,
    coordinator: Rc<RefCell<ListReorderCoordinator<SharedString>>>,
    sort_queue: Rc<RefCell<Vec<SortEvent>>>,
    _sort_subscription: Subscription,
    host: OverlayHost,
    origin: Point<Pixels>,
    // A swap was applied and the rows have not been laid out in the new order yet.
    layout_pending: bool,
    callbacks: SortableListCallbacks<T>,
    render_item: RenderItem<T>,
}

impl<T: 'static> SortableListState<T> {
    pub fn new(cx: &mut App) -> Self {
        let config = SortableConfig::default();
        let coordinator = Rc::new(RefCell::new(ListReorderCoordinator::new(config.clone())));
        let sort_queue = Rc::new(RefCell::new(Vec::new()));
        let sort_subscription = coordinator.borrow().subscribe({
            let sort_queue = Rc::clone(&sort_queue);
            move |event| sort_queue.borrow_mut().push(*event)
        });

        Self {
            focus_handle: cx.focus_handle(),
            items: Vec::new(),
            slots: Vec::new(),
            config,
            layout: SortableLayout::default(),
            gap: px(0.),
            item_margin: px(0.),
            capture: PointerCapture::new(),
            coordinator,
            sort_queue,
            _sort_subscription: sort_subscription,
            host: OverlayHost::default(),
            origin: Point::default(),
            layout_pending: false,
            callbacks: SortableListCallbacks::default(),
            render_item: Rc::new(render_label::<T>),
        }
    }

    pub fn items(mut self, items: impl Into<Vec<SortableItem<T>>>) -> Self {
        self.replace_items(items.into());
        self
    }

    pub fn config(mut self, config: SortableConfig) -> Self {
        self.apply_config(config);
        self
    }

    pub fn layout(mut self, layout: SortableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn gap(mut self, gap: Pixels) -> Self {
        self.gap = gap;
        self
    }

    /// Outer margin of every row. The ghost is aligned to the margin box.
    pub fn item_margin(mut self, margin: Pixels) -> Self {
        self.item_margin = margin;
        for slot in &self.slots {
            slot.geometry.margins.set(Margins::uniform(f32::from(margin)));
        }
        self
    }

    /// Provide a callback invoked after a swap was applied to the items.
    pub fn on_sort(mut self, on_sort: impl Fn(&SortEvent, &[SortableItem<T>]) + 'static) -> Self {
        self.callbacks.on_sort = Some(Rc::new(on_sort));
        self
    }

    pub fn set_items(&mut self, items: impl Into<Vec<SortableItem<T>>>, cx: &mut Context<Self>) {
        self.replace_items(items.into());
        cx.notify();
    }

    pub fn set_config(&mut self, config: SortableConfig, cx: &mut Context<Self>) {
        self.apply_config(config);
        cx.notify();
    }

    pub fn items_ref(&self) -> &[SortableItem<T>] {
        &self.items
    }

    /// Index of the item currently being dragged.
    pub fn dragging_index(&self) -> Option<usize> {
        dragging_slot(&self.slots)
    }

    /// Forward a touch start on the item `id`. The drag begins once the touch has
    /// been held for the configured delay without moving.
    pub fn touch_start(
        &mut self,
        id: &SharedString,
        position: Point<Pixels>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.start_gesture(id, GestureStart::touch(to_position(position)), window, cx);
    }

    pub fn touch_move(&mut self, position: Point<Pixels>, window: &mut Window, cx: &mut Context<Self>) {
        self.on_pointer_move(position, window, cx);
    }

    pub fn touch_end(&mut self, cx: &mut Context<Self>) {
        self.on_pointer_up(cx);
    }

    fn replace_items(&mut self, items: Vec<SortableItem<T>>) {
        for slot in &mut self.slots {
            slot.controller.cancel(&mut self.host);
        }
        self.slots = items.iter().map(|item| self.new_slot(item)).collect();
        self.items = items;
        self.layout_pending = false;
        self.sync_coordinator();
    }

    fn new_slot(&self, item: &SortableItem<T>) -> ItemSlot {
        let controller = ItemDragController::new(self.config.clone(), self.capture.clone());
        let move_subscription =
            ListReorderCoordinator::connect(&self.coordinator, item.id.clone(), &controller);
        ItemSlot {
            geometry: Rc::new(RowGeometry::new(self.item_margin, item.is_disabled())),
            controller,
            _move_subscription: move_subscription,
        }
    }

    fn apply_config(&mut self, config: SortableConfig) {
        for slot in &mut self.slots {
            slot.controller.set_config(config.clone());
        }
        self.coordinator.borrow_mut().set_config(config.clone());
        self.config = config;
    }

    fn sync_coordinator(&self) {
        self.coordinator.borrow_mut().set_items(
            self.items
                .iter()
                .zip(&self.slots)
                .map(|(item, slot)| {
                    (
                        item.id.clone(),
                        Rc::clone(&slot.geometry) as Rc<dyn ItemGeometry>,
                    )
                }),
        );
    }

    fn index_of(&self, id: &SharedString) -> Option<usize> {
        self.items.iter().position(|item| item.id == *id)
    }

    fn on_row_mouse_down(
        &mut self,
        id: &SharedString,
        position: Point<Pixels>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.start_gesture(id, GestureStart::mouse(to_position(position)), window, cx);
    }

    fn start_gesture(
        &mut self,
        id: &SharedString,
        input: GestureStart,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(ix) = self.index_of(id) else {
            return;
        };
        if self.items[ix].is_disabled() {
            return;
        }

        let slot = &mut self.slots[ix];
        let response = slot
            .controller
            .gesture_start(input, slot.geometry.as_ref(), &mut self.host);
        self.spawn_requested_timers(id.clone(), cx);
        self.finish_input(response, window, cx);
    }

    fn on_pointer_move(&mut self, position: Point<Pixels>, window: &mut Window, cx: &mut Context<Self>) {
        let position = to_position(position);
        let Some(ix) = active_slot(&self.slots) else {
            return;
        };
        let response = self.slots[ix].controller.gesture_move(position, &mut self.host);
        self.finish_input(response, window, cx);
    }

    fn on_pointer_up(&mut self, cx: &mut Context<Self>) {
        let Some(ix) = active_slot(&self.slots) else {
            return;
        };
        self.slots[ix].controller.gesture_end(&mut self.host);
        cx.notify();
    }

    fn on_activation_elapsed(&mut self, id: &SharedString, timer_id: u64, cx: &mut Context<Self>) {
        if !self.host.finish_timer(timer_id) {
            return;
        }
        let Some(ix) = self.index_of(id) else {
            return;
        };
        self.slots[ix].controller.activation_elapsed(&mut self.host);
        cx.notify();
    }

    fn spawn_requested_timers(&mut self, id: SharedString, cx: &mut Context<Self>) {
        for (timer_id, delay) in std::mem::take(&mut self.host.requested) {
            let id = id.clone();
            let task = cx.spawn(async move |this, cx| {
                Timer::after(delay).await;
                this.update(cx, |this, cx| this.on_activation_elapsed(&id, timer_id, cx))
                    .ok();
            });
            self.host.timers.push((timer_id, task));
        }
    }

    fn finish_input(&mut self, response: InputResponse, window: &mut Window, cx: &mut Context<Self>) {
        if response == InputResponse::PreventDefault {
            window.prevent_default();
        }
        self.apply_pending_sorts();
        cx.notify();
    }

    fn apply_pending_sorts(&mut self) {
        let events = std::mem::take(&mut *self.sort_queue.borrow_mut());
        let applied = apply_sort_events(
            events,
            &mut self.items,
            &mut self.slots,
            &mut self.layout_pending,
        );
        if let Some(on_sort) = self.callbacks.on_sort.as_ref() {
            for event in &applied {
                on_sort(event, &self.items);
            }
        }
    }
}

/// Apply queued sort events to the items and their slots in lockstep, so each
/// controller keeps following its item. Returns the events that were applied.
///
/// Once a swap is applied the row rects are stale until the next layout, so
/// every later event is dropped until `layout_pending` is cleared.
fn apply_sort_events<T>(
    events: Vec<SortEvent>,
    items: &mut [SortableItem<T>],
    slots: &mut [ItemSlot],
    layout_pending: &mut bool,
) -> Vec<SortEvent> {
    let mut applied = Vec::new();
    for event in events {
        if *layout_pending {
            trace!(?event, "previous swap not laid out yet, skipping");
            continue;
        }
        let touches_pinned = [event.current_index, event.new_index]
            .iter()
            .any(|&ix| items.get(ix).is_some_and(SortableItem::is_disabled));
        if touches_pinned || items.len() != slots.len() {
            trace!(?event, "ignoring sort event");
            continue;
        }
        if !event.apply_swap(items) {
            continue;
        }
        event.apply_swap(slots);
        *layout_pending = true;
        applied.push(event);
    }
    applied
}

fn dragging_slot(slots: &[ItemSlot]) -> Option<usize> {
    slots.iter().position(|slot| slot.controller.is_dragging())
}

/// The slot pointer input belongs to: the dragging one, else a pending touch hold.
fn active_slot(slots: &[ItemSlot]) -> Option<usize> {
    dragging_slot(slots).or_else(|| {
        slots
            .iter()
            .position(|slot| slot.controller.phase() == DragPhase::PendingActivation)
    })
}

impl<T: 'static> Render for SortableListState<T> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.sync_coordinator();
        self.layout_pending = false;

        let render_item = Rc::clone(&self.render_item);
        let state_entity = cx.entity();
        let margin = self.item_margin;

        let mut rows = Vec::with_capacity(self.items.len());
        for (ix, (item, slot)) in self.items.iter().zip(&self.slots).enumerate() {
            let row_state = SortableRowState {
                dragging: slot.controller.is_dragging(),
                ghost: false,
            };
            let content = (render_item)(ix, item, row_state, window, cx);
            let id = item.id.clone();
            let is_disabled = item.is_disabled();

            let row = div()
                .id(("sortable-row", ix))
                .relative()
                .m(margin)
                .child(content)
                .child(
                    div()
                        .absolute()
                        .top_0()
                        .left_0()
                        .size_full()
                        .child(RowBoundsElement::new(Rc::clone(&slot.geometry))),
                )
                .when(row_state.dragging, |this| this.opacity(0.4))
                .when(!is_disabled, |this| {
                    this.cursor(CursorStyle::OpenHand).on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, event: &MouseDownEvent, window, cx| {
                            this.on_row_mouse_down(&id, event.position, window, cx);
                        }),
                    )
                });
            rows.push(row);
        }

        let origin = self.origin;
        let ghost = self.host.ghost.and_then(|overlay| {
            let ix = self.dragging_index()?;
            let row_state = SortableRowState {
                dragging: false,
                ghost: true,
            };
            let content = (render_item)(ix, &self.items[ix], row_state, window, cx);
            Some(
                deferred(
                    div()
                        .absolute()
                        .left(px(overlay.rect.left) - origin.x)
                        .top(px(overlay.rect.top) - origin.y)
                        .w(px(overlay.rect.width))
                        .m(margin)
                        .shadow_md()
                        .child(content),
                )
                .with_priority(overlay.z_index as usize),
            )
        });

        let list = match self.layout {
            SortableLayout::Column => v_flex().gap(self.gap),
            SortableLayout::Wrap => h_flex().flex_wrap().items_start().gap(self.gap),
        };

        div()
            .id("sortable-list-state")
            .size_full()
            .relative()
            .child(list.children(rows))
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .size_full()
                    .child(DragCaptureElement::new(state_entity)),
            )
            .when_some(ghost, |this, ghost| this.child(ghost))
    }
}

/// Records a row's bounds during prepaint.
struct RowBoundsElement {
    geometry: Rc<RowGeometry>,
}

impl RowBoundsElement {
    fn new(geometry: Rc<RowGeometry>) -> Self {
        Self { geometry }
    }
}

impl IntoElement for RowBoundsElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for RowBoundsElement {
    type RequestLayoutState = ();
    type PrepaintState = ();

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static std::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        (window.request_layout(full_size_style(), [], cx), ())
    }

    fn prepaint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        _window: &mut Window,
        _cx: &mut App,
    ) -> Self::PrepaintState {
        self.geometry.bounds.set(to_rect(bounds));
    }

    fn paint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        _prepaint: &mut Self::PrepaintState,
        _window: &mut Window,
        _cx: &mut App,
    ) {
    }
}

/// Covers the list. Records the list origin for ghost placement and, only while
/// a drag holds the pointer capture, listens to mouse move/up on the whole window.
struct DragCaptureElement<T: 'static> {
    state: Entity<SortableListState<T>>,
}

impl<T: 'static> DragCaptureElement<T> {
    fn new(state: Entity<SortableListState<T>>) -> Self {
        Self { state }
    }
}

impl<T: 'static> IntoElement for DragCaptureElement<T> {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl<T: 'static> Element for DragCaptureElement<T> {
    type RequestLayoutState = ();
    type PrepaintState = ();

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static std::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        (window.request_layout(full_size_style(), [], cx), ())
    }

    fn prepaint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        _window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        self.state.update(cx, |state, _| {
            state.origin = bounds.origin;
        });
    }

    fn paint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        _prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        if !self.state.read(cx).capture.is_held() {
            return;
        }

        window.on_mouse_event({
            let state = self.state.clone();
            move |event: &MouseMoveEvent, phase, window, cx| {
                if !phase.bubble() {
                    return;
                }
                state.update(cx, |this, cx| {
                    this.on_pointer_move(event.position, window, cx);
                });
            }
        });

        window.on_mouse_event({
            let state = self.state.clone();
            move |event: &MouseUpEvent, phase, _window, cx| {
                if !phase.bubble() || event.button != MouseButton::Left {
                    return;
                }
                state.update(cx, |this, cx| this.on_pointer_up(cx));
            }
        });
    }
}

fn render_label<T>(
    _ix: usize,
    item: &SortableItem<T>,
    _row_state: SortableRowState,
    _window: &mut Window,
    _cx: &mut App,
) -> AnyElement {
    div().child(item.label.clone()).into_any_element()
}

fn full_size_style() -> gpui::Style {
    let mut style = gpui::Style::default();
    style.size.width = gpui::relative(1.).into();
    style.size.height = gpui::relative(1.).into();
    style
}

fn to_position(point: Point<Pixels>) -> Position {
    Position::new(f32::from(point.x), f32::from(point.y))
}

fn to_rect(bounds: Bounds<Pixels>) -> Rect {
    Rect::from_origin_size(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    )
}

/// A list element whose items can be dragged to reorder them.
#[derive(IntoElement)]
pub struct SortableList<T: 'static> {
    id: ElementId,
    state: Entity<SortableListState<T>>,
    style: StyleRefinement,
    render_item: RenderItem<T>,
}

impl<T: 'static> SortableList<T> {
    pub fn new<R>(state: &Entity<SortableListState<T>>, render_item: R) -> Self
    where
        R: Fn(usize, &SortableItem<T>, SortableRowState, &mut Window, &mut App) -> AnyElement
            + 'static,
    {
        Self {
            id: ElementId::Name(format!("sortable-list-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_item: Rc::new(render_item),
        }
    }
}

impl<T: 'static> Styled for SortableList<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: 'static> RenderOnce for SortableList<T> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        self.state
            .update(cx, |state, _| state.render_item = self.render_item);

        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .size_full()
            .child(self.state)
            .refine_style(&self.style)
    }
}
