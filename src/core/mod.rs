#[macro_use]
pub mod contract;
pub mod error;
pub mod queue;
pub mod log;
pub mod buildcore;
