pub mod batch;
pub mod report;
pub mod targets;

pub use report::*;
pub use targets::*;
