//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /cache/:key` - Read a value, creating it on miss
//! - `GET /cache?properties=a,b` - List entries projected to fields
//! - `PUT /cache/:key` - Upsert the raw body as the value
//! - `DELETE /cache/:key` - Delete a key
//! - `DELETE /cache` - Clear all entries
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
