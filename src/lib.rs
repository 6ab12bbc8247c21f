//! Authentication and user administration for the CRM backend.
//!
//! [`routes::root::routes`] builds the complete HTTP API from a user repository,
//! a token codec and a role cache. The binary wires these to Postgres; tests use
//! [`repository::memory_repository::InMemoryUserRepository`].

pub mod config;
pub mod dto;
pub mod entity;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
