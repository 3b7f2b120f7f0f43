#![doc = "The `ticklist` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic for the ticklist application:"]
#![doc = "session-based authentication, the owner-scoped todo repository, routing"]
#![doc = "configuration, error handling, and the derived-view helpers (filter, sort,"]
#![doc = "kanban grouping) that clients recompute over the returned todo list."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;
