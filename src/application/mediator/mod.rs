//! Typed command/query dispatch.
//!
//! A [`Mediator`] routes a request value to the single handler registered
//! for its type and returns the handler's result. Callers depend only on the
//! request types; handlers are wired once at startup through a
//! [`MediatorBuilder`], which also validates that every required request type
//! has exactly one handler.
//!
//! ```ignore
//! let mediator = Mediator::builder()
//!     .register::<Ping, _>(PingHandler)
//!     .require::<Ping>()
//!     .build()?;
//!
//! let pong = mediator.send(Ping).await?;
//! ```

mod error;
mod mediator;

pub use error::{ConfigurationError, HandlerError};
pub use mediator::{Mediator, MediatorBuilder, Request, RequestHandler};
