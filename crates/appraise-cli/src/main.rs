//! Appraise CLI Application
//!
//! Command-line shell for the performance plan review workflow.

mod args;
mod cli;
mod display;
mod feedback;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use appraise_core::{params::ListPlans, ReviewServiceBuilder};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", feedback::describe(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        database_file,
        no_color,
        command,
    } = args;

    let service = ReviewServiceBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize review service")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(service, renderer);

    info!("Appraise started");

    match command {
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Review(args)) => cli.handle_review(args).await,
        None => cli.list_plans(&ListPlans::default()).await,
    }
}
