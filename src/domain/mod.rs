pub mod item;
pub mod status;
pub mod steps;

pub use item::{CreatedItem, Difficulty, Item};
pub use status::ItemStatus;
pub use steps::{processing_steps, ProcessingStep, StepState};
