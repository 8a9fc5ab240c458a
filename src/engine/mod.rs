pub mod algorithm;
pub mod bubble;
pub mod cancel;
pub mod controller;
pub mod driver;
pub mod insertion;
pub mod run;
pub mod selection;

pub use algorithm::Algorithm;
pub use controller::RunController;
pub use run::{RunStatus, RunUpdate, SortRun};
