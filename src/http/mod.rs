//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned and propagated, request span)
//!     → middleware/metrics.rs (per-route counters and latency)
//!     → handlers.rs (/compare, /customers)
//!     → response.rs (errors mapped to JSON responses)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::HttpServer;
