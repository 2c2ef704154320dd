use std::process::ExitCode;

use clap::Parser;

use crate::cli::App;

mod cli;
mod config;
mod logging;

fn main() -> anyhow::Result<ExitCode> {
    let app = App::parse();
    logging::init(app.verbose);
    app.cmd.run(&app.global)
}
