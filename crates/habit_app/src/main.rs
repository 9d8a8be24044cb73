use clap::Parser;
use habit_app::app::{run, AppConfig};
use habit_app::cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("habits: {err:#}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(config, cli.command.unwrap_or(Command::Today)) {
        eprintln!("habits: {err:#}");
        std::process::exit(1);
    }
}
