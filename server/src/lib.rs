//! Urban Waves account service.
//!
//! A small JSON API over a single persistent collection of user
//! records: signup with a uniqueness check and password hashing,
//! credential verification, and partial profile updates. No sessions
//! or tokens are issued; every handler is an independent
//! request/response pair over the shared [`store::UserStore`].

pub mod application;
pub mod database;
pub mod error;
pub mod password;
pub mod routes;
pub mod settings;
pub mod store;
pub mod user;

pub use application::launch;
