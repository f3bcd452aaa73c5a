pub mod fruit_list;
pub mod fruits;
