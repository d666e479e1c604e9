//! Portal workflows: registration, login, applications and admin moderation.
//!
//! Split the same way as the rest of the service layer: plain domain inputs/outputs,
//! a business error type, and a service holding the store handle.

pub mod domain;
pub mod errors;
pub mod cascade;
pub mod service;

pub use errors::PortalError;
pub use service::PortalService;
