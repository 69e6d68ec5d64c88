mod report;
mod runner;
pub(crate) mod summary;


pub use report::Reporter;
pub use runner::{ProbeTally, RunReport, RunState, Runner};
