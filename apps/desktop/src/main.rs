use clap::Parser;
use study_desktop_lib::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    study_desktop_lib::run(Cli::parse()).await
}
