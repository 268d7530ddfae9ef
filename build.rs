//! Compiles the todo and event service definitions.
//!
//! Server traits are generated too; the crate's tests run an in-process backend on them.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(
            &["proto/todo/v1/todo.proto", "proto/event/v1/event.proto"],
            &["proto"],
        )?;
    Ok(())
}
