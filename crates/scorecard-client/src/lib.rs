//! Client for the remote credit scoring service
//!
//! The dashboard never computes scores itself. Every client record, with its
//! score, decision and feature importances, comes from a remote service
//! reached through the [`ScoringService`] trait.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]

pub mod error;
pub mod http;
pub mod mock;
pub mod service;

pub use error::{FetchError, FetchResult};
pub use http::HttpScoringService;
pub use mock::MockScoringService;
pub use service::ScoringService;
