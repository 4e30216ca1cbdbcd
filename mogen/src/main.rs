mod cli;

use clap::Parser;
use clap::error::ErrorKind;

use cli::{Cli, STATUS_ERR, STATUS_OK};

fn main() {
    let _ = color_eyre::install();
    let status = match Cli::try_parse() {
        Ok(cli) => cli.run(),
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => STATUS_OK,
                _ => STATUS_ERR,
            }
        }
    };
    std::process::exit(status);
}
