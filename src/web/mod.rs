//! HTTP layer for imgdrop.
//!
//! Routes:
//! - `GET /` index page with an upload form
//! - `POST /upload` multipart image upload
//! - `GET /uploads/:name` stored image bytes
//! - `GET /health` liveness check

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::{shutdown_signal, WebServer};
