//! Contract interface descriptors loaded from build artifacts

mod artifact;

pub use artifact::{load_artifact, parse_artifact};
