//! JSON web API for symptom matching.
//!
//! The matcher is built once at startup and shared read-only across handlers.
//! An [`AccessGate`](crate::access::AccessGate) decides who may call the
//! analysis routes.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! symptom-matcher serve
//!
//! # Require x-username / x-password headers
//! symptom-matcher serve --require-login
//!
//! # Bind to all interfaces
//! symptom-matcher serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /api/catalog` - List all conditions in the reference table
//! - `POST /api/analyze` - `{"symptoms": "...", "top_k": 3}`, top conditions with confidence
//! - `POST /api/scan` - `{"symptom": "..."}`, single best condition

pub mod server;
