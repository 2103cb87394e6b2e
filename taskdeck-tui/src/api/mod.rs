mod client;
mod dev_backend;
mod dto;
mod error;

pub use client::ApiClient;
pub use dev_backend::{DevBackend, DEV_EMAIL, DEV_PASSWORD};
pub use error::ApiError;
