#![no_std]

pub use engine::*;
pub use error::*;
pub use types::*;

mod engine;
mod error;
mod types;
