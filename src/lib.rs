//! Random input fixtures for triangle-intersection tests.
//!
//! Two record layouts share one file shape: a count on the first line, then
//! the records. [`triangles`] writes integer triangles, one per line.
//! [`normals`] writes truncated normal samples, wrapped every 50 records.

pub mod check;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod normals;
pub mod triangles;

pub use error::{Error, Result};
pub use fixture::{generate, GenerateOptions, Layout};
