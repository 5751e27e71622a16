//! Image-generation API client for PULL-E.
mod images;

pub use images::{ImagesClient, ImagesConfig, ImagesError};
