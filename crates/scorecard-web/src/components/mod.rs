//! Server-side rendering of view descriptions with leptos components

pub mod blocks;
pub mod charts;
pub mod layout;

pub use layout::{RELOAD_PATH, SELECT_CLIENT_PATH, render_document};
