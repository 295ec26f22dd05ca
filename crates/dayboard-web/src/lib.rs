pub mod app;
pub mod backend;
pub mod components;
pub mod store;
