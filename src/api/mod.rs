//! TheCatAPI access: wire types and the HTTP client.

pub mod client;
pub mod dto;

pub use client::{BreedApi, RemoteSource};
