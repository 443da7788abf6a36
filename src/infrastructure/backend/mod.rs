//! Generation backend client.

mod client;
mod dto;

pub use client::HttpImageApi;
