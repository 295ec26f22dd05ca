pub mod calendar;
pub mod task;
pub mod validate;
pub mod view;
