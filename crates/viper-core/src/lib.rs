pub mod builder;
pub mod pipeline;

pub use builder::build_preprocess_result;
pub use pipeline::{RunOptions, RunOutcome, default_config_dir, generate_run_id, run};
