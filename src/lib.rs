//! ghl library entry point
//!
//! RPC client bootstrap for the todo and event services, plus the dev proxy table.

pub mod backend;
pub mod commands;
pub mod config;
pub mod dev_proxy;
pub mod rpc;

pub use rpc::client::{Clients, EventClient, TodoClient, Transport};
