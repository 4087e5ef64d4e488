pub mod bundle;
pub mod loader;

pub use bundle::{DiseaseCoverage, ReferenceBundle, RunParameters};
pub use loader::load_bundle;
