#![forbid(unsafe_code)]

pub mod banks;
pub mod catalog;
pub mod checker;
pub mod curricula;
pub mod error;
pub mod generators;
pub mod model;
pub mod quiz;
pub mod selector;
pub mod time;

pub use error::Error;
pub use time::Clock;
