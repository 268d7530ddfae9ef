//! RPC module for the todo and event services
//!
//! Declares the generated gRPC stubs and the client factory built on them.

pub mod client;

// Include generated protobuf code
pub mod todo {
    pub mod v1 {
        tonic::include_proto!("todo.v1");
    }
}

pub mod event {
    pub mod v1 {
        tonic::include_proto!("event.v1");
    }
}

/// Path prefix every TodoService method is served under
pub const TODO_SERVICE_PATH: &str = "/todo.v1.TodoService";

/// Path prefix every EventService method is served under
pub const EVENT_SERVICE_PATH: &str = "/event.v1.EventService";
