//! API Module
//!
//! HTTP handlers and routing for the cache service REST API.
//!
//! # Endpoints
//! - `PUT /set` - Cache a JSON payload under a key
//! - `GET /get/:key` - Retrieve a cached payload
//! - `DELETE /del/:key` - Clear a key (idempotent)
//! - `POST /clear` - Wipe both tiers entirely
//! - `GET /stats` - Fast-tier snapshot and counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
