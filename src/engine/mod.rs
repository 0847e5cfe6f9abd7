mod classifier;
mod core;

pub use classifier::{UpdateClassification, UpdateClassifier, classify_update};
pub use core::{AppliedUpdate, ChartEngine};
