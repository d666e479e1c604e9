//! Domain entities for the placement portal document.
//!
//! Everything here is plain data plus small pure helpers; persistence lives in the
//! `service` crate.

pub mod errors;
pub mod ids;
pub mod user;
pub mod job;
pub mod application;
pub mod document;
pub mod session;
