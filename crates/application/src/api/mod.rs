//! Authenticated access to the clinic API.

mod client;
mod resources;

pub use client::ApiClient;
