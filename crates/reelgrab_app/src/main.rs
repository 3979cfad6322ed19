use std::process::ExitCode;

use clap::Parser;
use reelgrab_app::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match reelgrab_app::platform::run(cli) {
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("reelgrab: {err:#}");
            ExitCode::from(2)
        }
    }
}
