pub mod controllers;
pub mod error;
pub mod util;

pub use error::Error;
