pub mod error;
pub mod models;
pub mod selectors;
pub mod source;
pub mod state;
pub mod storage;

pub use error::{Error, Result};
