//! Credit scoring dashboard
//!
//! A server-rendered web dashboard that shows pre-computed credit scores,
//! feature importances and reference distributions for one client at a time.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod components;
pub mod controller;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod views;

pub use server::build_app;
pub use session::{FetchStatus, Page, Session};
pub use state::AppState;
