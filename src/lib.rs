pub mod api;
pub mod booking;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod observability;
pub mod state;
pub mod store;
