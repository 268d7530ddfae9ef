//! gRPC client factory
//!
//! Builds one lazily-connected transport per backend address and hands out typed
//! service clients that all share it. Nothing touches the network until the first
//! call, so an unreachable backend only shows up as a per-call `Status`.

use std::sync::Arc;
use std::task::{Context, Poll};

use tonic::body::BoxBody;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::http::{self, Uri};
use tonic::codegen::Service;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;

use super::event::v1::event_service_client::EventServiceClient;
use super::event::v1::{
    CreateEventRequest, Event, GetEventRegistrationsRequest, ListEventsRequest,
    RegisterForEventRequest, Registration,
};
use super::todo::v1::todo_service_client::TodoServiceClient;
use super::todo::v1::{
    CreateTodoRequest, DeleteTodoRequest, ListTodosRequest, Todo, UpdateTodoRequest,
};
use crate::config;

/// Channel bound to one backend base URL
#[derive(Debug)]
pub struct Transport {
    base_url: String,
    channel: RpcChannel,
}

impl Transport {
    /// Fails only when `base_url` is not a valid URI.
    ///
    /// A path in `base_url` (`http://host/api`) is kept in front of every RPC path.
    pub fn new(base_url: &str) -> Result<Self, tonic::transport::Error> {
        let endpoint = Endpoint::from_shared(base_url.to_string())?;
        let prefix: Option<Arc<str>> = match endpoint.uri().path().trim_end_matches('/') {
            "" => None,
            path => Some(Arc::from(path)),
        };

        Ok(Self {
            base_url: base_url.to_string(),
            channel: RpcChannel {
                inner: endpoint.connect_lazy(),
                prefix,
            },
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path placed before `/<package>.<Service>/<Method>`, if any
    pub fn path_prefix(&self) -> Option<&str> {
        self.channel.prefix.as_deref()
    }

    // Channel clones multiplex over the same connection.
    fn channel(&self) -> RpcChannel {
        self.channel.clone()
    }
}

/// `Channel` that sends every request under the base URL's path.
///
/// The channel itself only keeps the scheme and authority of its endpoint.
#[derive(Debug, Clone)]
pub struct RpcChannel {
    inner: Channel,
    prefix: Option<Arc<str>>,
}

impl Service<http::Request<BoxBody>> for RpcChannel {
    type Response = <Channel as Service<http::Request<BoxBody>>>::Response;
    type Error = <Channel as Service<http::Request<BoxBody>>>::Error;
    type Future = <Channel as Service<http::Request<BoxBody>>>::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Service::poll_ready(&mut self.inner, cx)
    }

    fn call(&mut self, mut request: http::Request<BoxBody>) -> Self::Future {
        if let Some(prefix) = &self.prefix {
            match with_path_prefix(request.uri(), prefix) {
                Ok(uri) => *request.uri_mut() = uri,
                Err(e) => tracing::warn!("Could not apply path prefix {}: {}", prefix, e),
            }
        }
        Service::call(&mut self.inner, request)
    }
}

fn with_path_prefix(uri: &Uri, prefix: &str) -> Result<Uri, http::Error> {
    let path = uri.path_and_query().map(PathAndQuery::as_str).unwrap_or("/");
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(format!("{}{}", prefix, path))?);
    Ok(Uri::from_parts(parts)?)
}

/// Typed clients for every remote service, built on one transport
#[derive(Debug, Clone)]
pub struct Clients {
    pub todo: TodoClient,
    pub event: EventClient,
}

impl Clients {
    /// Build clients for `base_url`, or for the default backend when none is given.
    ///
    /// An unreachable backend is not detected here; it surfaces as a `Status` on the
    /// first call. The only error is a `base_url` that does not parse as a URI.
    pub fn new(base_url: Option<&str>) -> Result<Self, tonic::transport::Error> {
        let base_url = config::resolve_base_url(base_url);
        let transport = Arc::new(Transport::new(&base_url)?);

        tracing::info!("RPC clients bound to {}", transport.base_url());

        Ok(Self {
            todo: TodoClient::new(transport.clone()),
            event: EventClient::new(transport),
        })
    }

    /// Build clients for the backend configured in the environment
    pub fn from_env() -> Result<Self, tonic::transport::Error> {
        Self::new(Some(config::base_url()))
    }

    pub fn transport(&self) -> &Arc<Transport> {
        self.todo.transport()
    }
}

fn missing(field: &str) -> Status {
    Status::internal(format!("response is missing {}", field))
}

/// Client for `todo.v1.TodoService`
#[derive(Debug, Clone)]
pub struct TodoClient {
    transport: Arc<Transport>,
}

impl TodoClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    fn stub(&self) -> TodoServiceClient<RpcChannel> {
        TodoServiceClient::new(self.transport.channel())
    }

    pub async fn create_todo(&self, title: &str) -> Result<Todo, Status> {
        tracing::debug!("RPC: create_todo");
        let response = self
            .stub()
            .create_todo(CreateTodoRequest {
                title: title.to_string(),
            })
            .await?;

        response.into_inner().todo.ok_or_else(|| missing("todo"))
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, Status> {
        tracing::debug!("RPC: list_todos");
        let response = self.stub().list_todos(ListTodosRequest {}).await?;
        Ok(response.into_inner().todos)
    }

    /// Replaces both the title and the completed flag.
    pub async fn update_todo(&self, id: &str, title: &str, completed: bool) -> Result<Todo, Status> {
        tracing::debug!("RPC: update_todo {}", id);
        let response = self
            .stub()
            .update_todo(UpdateTodoRequest {
                id: id.to_string(),
                title: title.to_string(),
                completed,
            })
            .await?;

        response.into_inner().todo.ok_or_else(|| missing("todo"))
    }

    pub async fn delete_todo(&self, id: &str) -> Result<(), Status> {
        tracing::debug!("RPC: delete_todo {}", id);
        self.stub()
            .delete_todo(DeleteTodoRequest { id: id.to_string() })
            .await?;
        Ok(())
    }
}

/// Client for `event.v1.EventService`
#[derive(Debug, Clone)]
pub struct EventClient {
    transport: Arc<Transport>,
}

impl EventClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    fn stub(&self) -> EventServiceClient<RpcChannel> {
        EventServiceClient::new(self.transport.channel())
    }

    pub async fn create_event(
        &self,
        title: &str,
        description: &str,
        date: &str,
        capacity: i32,
    ) -> Result<Event, Status> {
        tracing::debug!("RPC: create_event (capacity {})", capacity);
        let response = self
            .stub()
            .create_event(CreateEventRequest {
                title: title.to_string(),
                description: description.to_string(),
                date: date.to_string(),
                capacity,
            })
            .await?;

        response.into_inner().event.ok_or_else(|| missing("event"))
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, Status> {
        tracing::debug!("RPC: list_events");
        let response = self.stub().list_events(ListEventsRequest {}).await?;
        Ok(response.into_inner().events)
    }

    pub async fn register_for_event(
        &self,
        event_id: &str,
        name: &str,
        email: &str,
    ) -> Result<Registration, Status> {
        tracing::debug!("RPC: register_for_event {}", event_id);
        let response = self
            .stub()
            .register_for_event(RegisterForEventRequest {
                event_id: event_id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;

        response
            .into_inner()
            .registration
            .ok_or_else(|| missing("registration"))
    }

    pub async fn get_event_registrations(&self, event_id: &str) -> Result<Vec<Registration>, Status> {
        tracing::debug!("RPC: get_event_registrations {}", event_id);
        let response = self
            .stub()
            .get_event_registrations(GetEventRegistrationsRequest {
                event_id: event_id.to_string(),
            })
            .await?;

        Ok(response.into_inner().registrations)
    }
}
