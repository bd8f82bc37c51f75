//! Provider client implementations

pub mod openai;
mod common;

pub use common::UserAgent;
