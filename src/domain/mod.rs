mod bar;
mod viewport;

pub use bar::{Bar, BarKind, RawBar};
pub use viewport::PaneViewport;
