pub mod config;
pub mod datetime;
pub mod error;
pub mod events;
pub mod ui;
pub mod view;
