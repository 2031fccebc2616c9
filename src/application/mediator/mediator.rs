use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use super::error::{ConfigurationError, HandlerError};

/// A value routed by the mediator. The implementing type selects the handler.
pub trait Request: fmt::Debug + Send + 'static {
    type Response: Send + 'static;
}

/// Handles exactly one request type.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    async fn handle(&self, request: R) -> Result<R::Response, HandlerError>;
}

/// Type-erased `Arc<dyn RequestHandler<R>>` plus the request name for diagnostics.
struct Registration {
    request: &'static str,
    handler: Box<dyn Any + Send + Sync>,
}

/// Routes requests to their registered handlers.
///
/// Immutable once built, so a single instance can be shared behind an `Arc`
/// by any number of concurrent callers.
pub struct Mediator {
    handlers: HashMap<TypeId, Registration>,
}

impl Mediator {
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::default()
    }

    /// Dispatch a request to its handler.
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, HandlerError> {
        let handler = self.handler::<R>()?;
        trace!(request = type_name::<R>(), "dispatching request");
        handler.handle(request).await
    }

    /// Whether a handler for `R` is registered.
    pub fn is_registered<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    /// Names of all registered request types.
    pub fn requests(&self) -> Vec<&'static str> {
        self.handlers.values().map(|r| r.request).collect()
    }

    fn handler<R: Request>(&self) -> Result<Arc<dyn RequestHandler<R>>, HandlerError> {
        self.handlers
            .get(&TypeId::of::<R>())
            .and_then(|registration| {
                registration
                    .handler
                    .downcast_ref::<Arc<dyn RequestHandler<R>>>()
            })
            .cloned()
            .ok_or(HandlerError::Unregistered {
                request: type_name::<R>(),
            })
    }
}

impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("requests", &self.requests())
            .finish()
    }
}

/// Collects handler registrations and validates them in [`MediatorBuilder::build`].
#[derive(Default)]
pub struct MediatorBuilder {
    handlers: HashMap<TypeId, Registration>,
    required: Vec<(TypeId, &'static str)>,
    duplicates: Vec<&'static str>,
}

impl MediatorBuilder {
    /// Register a handler for request type `R`.
    pub fn register<R, H>(self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R>,
    {
        self.register_shared::<R>(Arc::new(handler))
    }

    /// Register an already shared handler, letting one value serve several request types.
    pub fn register_shared<R: Request>(mut self, handler: Arc<dyn RequestHandler<R>>) -> Self {
        let registration = Registration {
            request: type_name::<R>(),
            handler: Box::new(handler),
        };
        if self
            .handlers
            .insert(TypeId::of::<R>(), registration)
            .is_some()
        {
            self.duplicates.push(type_name::<R>());
        }
        self
    }

    /// Declare that `R` must have a handler by the time [`build`](Self::build) runs.
    pub fn require<R: Request>(mut self) -> Self {
        self.required.push((TypeId::of::<R>(), type_name::<R>()));
        self
    }

    /// Validate the registrations and produce the mediator.
    pub fn build(self) -> Result<Mediator, ConfigurationError> {
        if let Some(&request) = self.duplicates.first() {
            return Err(ConfigurationError::DuplicateHandler { request });
        }

        if let Some(&(_, request)) = self
            .required
            .iter()
            .find(|(id, _)| !self.handlers.contains_key(id))
        {
            return Err(ConfigurationError::MissingHandler { request });
        }

        Ok(Mediator {
            handlers: self.handlers,
        })
    }
}
