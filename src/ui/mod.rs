pub mod progress;

pub use progress::{BatchProgress, JsonProgress};
