pub mod config;
pub mod docks;
pub mod error;
pub mod event;
pub mod event_queue;
pub mod harbor;
pub mod observer;
pub mod random;
pub mod report;
pub mod tugboat;
pub mod types;
