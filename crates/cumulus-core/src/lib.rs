//! Core types for the Cumulus Cloudinary gateway.
//!
//! Holds everything that does not perform network I/O: account
//! configuration, the error type, request/response models, the request
//! signing routine, and the delivery URL / media tag builders.

pub mod config;
pub mod delivery;
pub mod error;
pub mod models;
pub mod signing;

pub use config::{CloudinaryConfig, SignatureAlgorithm};
pub use error::{CloudinaryError, Result};
