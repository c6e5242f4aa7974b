//! Account Verification Dashboard Library
//!
//! Server-rendered dashboard for checking whether Instagram and Twitter
//! accounts look genuine. The judgment itself comes from an external
//! prediction service; this crate validates input, calls the service and
//! renders what it returns.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `forms`: The three dashboard components and their view state.
//! - `handlers`: HTTP request handlers.
//! - `handoff`: Typed data passed between views.
//! - `models`: Prediction service request/response shapes.
//! - `prediction_client`: Prediction/search service client.
//! - `router`: Route table.
//! - `validation`: Username and query validation.
//! - `verification`: Verdict and criteria derivation.
//! - `views`: HTML rendering.

pub mod config;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod handoff;
pub mod models;
pub mod prediction_client;
pub mod router;
pub mod validation;
pub mod verification;
pub mod views;
