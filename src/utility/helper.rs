use crate::cli::args::{CLIArgs, Invocation};
use crate::error::CopyError;
use colored::Colorize;
use env_logger::Env;
use std::io::Write;

/// Environment variable holding the log filter, e.g. `COPYFILE_LOG=debug`.
pub const LOG_ENV: &str = "COPYFILE_LOG";

/// Send log records to stderr so they never interleave with the stdout messages.
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {:<5}: {}",
                record.module_path().unwrap_or("copyfile"),
                match record.level() {
                    log::Level::Error => "Error".red().bold(),
                    log::Level::Warn => "Warn".yellow().bold(),
                    log::Level::Info => "Info".green().bold(),
                    log::Level::Debug => "Debug".blue().bold(),
                    log::Level::Trace => "Trace".cyan().bold(),
                },
                record.args()
            )
        })
        .init();
}

pub fn print_usage() {
    println!("{}", CLIArgs::usage());
}

pub fn success_message(invocation: &Invocation) -> String {
    format!(
        "File copied successfully from '{}' to '{}'",
        invocation.input.display(),
        invocation.output.display()
    )
}

pub fn print_error(err: &CopyError) {
    println!("{} {}", "Error:".red().bold(), err);
}
