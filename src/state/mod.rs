//! Application state module

pub mod alert;
mod answers;
mod forms;
mod payload;
mod steps;
mod wizard;

pub use alert::{AlertKind, FormAlert, ProgressBar, Shake};
pub use answers::*;
pub use forms::*;
pub use payload::*;
pub use steps::*;
pub use wizard::*;
