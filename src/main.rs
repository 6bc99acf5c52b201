//! Authsync - Firebase Authentication to BigQuery exporter

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use authsync::adapter::config::Config;
use authsync::driver::{Args, AuthExportWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // --verbose の場合は info 以上を表示（RUST_LOG が優先）
    let default_filter = if args.is_verbose() { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected configuration
    let workflow = AuthExportWorkflow::new(config);

    workflow.execute(args).await
}
