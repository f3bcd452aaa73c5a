mod capture;
mod config;
mod controller;
mod coordinator;
mod events;
mod geometry;
mod list;

pub use capture::{CaptureGuard, PointerCapture};
pub use config::SortableConfig;
pub use controller::{
    DragEvent, DragHost, DragPhase, GestureStart, InputResponse, ItemDragController, ItemGeometry,
    PointerKind,
};
pub use coordinator::{ListReorderCoordinator, SortEvent, find_swap_target};
pub use events::{Emitter, Subscription};
pub use geometry::{Margins, Position, Rect};
pub use list::{
    SortableItem, SortableLayout, SortableList, SortableListState, SortableRowState,
    sortable_list,
};
