//! shopfloor — store management API server
//!
//! Single-process service exposing a typed query/mutation surface over four
//! persisted entity types: companies, products, orders and user credentials.
//! The transport delivers an already-parsed operation plus argument bag; the
//! dispatcher routes it to a resolver, which performs store side effects and
//! returns a typed result or a typed error.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod ops;
pub mod state;
pub mod store;
