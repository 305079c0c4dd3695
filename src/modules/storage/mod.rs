//! Storage module for uploaded media.
//!
//! Ad images live on the local filesystem under the configured media root
//! and are served back through the `/media` mount.

mod image_store;

pub use image_store::ImageStore;
