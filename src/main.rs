use crate::generator::workflow::launch;
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cache;
mod cli;
mod config;
mod generator;
mod i18n;
mod llm;
mod logging;
mod search;
mod utils;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = cli::Args::parse();
    let topic = args.topic.clone();
    let config = args.into_config()?;

    launch(&config, topic).await
}
