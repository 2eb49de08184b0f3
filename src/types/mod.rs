//! Common types used across the Indodax client library.

pub mod common;
pub mod params;

pub use common::*;
pub use params::RequestParams;
