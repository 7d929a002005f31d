//! Types shared between the speech crates and the HTTP server

mod error;

pub use error::{ErrorBody, HttpError};
