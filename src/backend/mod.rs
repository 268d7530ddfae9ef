//! Plain-HTTP access to the backend outside the RPC services

pub mod api;
