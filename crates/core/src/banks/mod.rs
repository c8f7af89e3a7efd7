//! Built-in multiple-choice question banks.

mod biology;

pub use biology::biology;
