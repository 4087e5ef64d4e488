//! Command entry points: flag handling and defaults live here, the real
//! work happens in `viper-core`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use viper_core::{RunOptions, RunOutcome, default_config_dir, generate_run_id, run};
use viper_model::Language;

use crate::cli::PreprocessArgs;

pub fn run_preprocess(args: &PreprocessArgs) -> Result<RunOutcome> {
    let options = RunOptions {
        input: args.input.clone(),
        language: args.language.into(),
        config_dir: args
            .config_dir
            .clone()
            .unwrap_or_else(|| default_config_dir(Path::new("."))),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("output")),
        run_id: args.run_id.clone().unwrap_or_else(generate_run_id),
    };
    run(&options)
}

pub fn run_languages() {
    for language in [Language::En, Language::Fr] {
        println!("{}", language.code());
    }
}
