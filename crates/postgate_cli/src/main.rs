//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `postgate_core` linkage without a classifier or storage backend.
//! - Print the seeded category catalog and the effective gate settings.

use postgate_core::{CategoryCatalog, GateConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("postgate_core ping={}", postgate_core::ping());
    println!("postgate_core version={}", postgate_core::core_version());

    let catalog = CategoryCatalog::with_defaults();
    for category in catalog.all() {
        println!("category id={} label={}", category.id, category.label);
    }

    match GateConfig::from_env() {
        Ok(config) => {
            println!(
                "gate policy={} language={} negative_forms={}",
                config.policy.as_str(),
                config.language.as_str(),
                config.negative_forms.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("gate config error: {err}");
            ExitCode::FAILURE
        }
    }
}
