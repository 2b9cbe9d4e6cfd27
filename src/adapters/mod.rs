//! Adapters - everything that touches the outside world.
//!
//! `ws` carries the WebSocket endpoints and the in-process group registry,
//! `http` the plain request/response endpoints, and `memory` the in-memory
//! implementations of the persistence ports.

pub mod http;
pub mod memory;
pub mod ws;
