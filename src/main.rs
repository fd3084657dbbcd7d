use copyfile::cli::args::{CLIArgs, CopyOptions};
use copyfile::core::copy::copy_file;
use copyfile::error::CopyResult;
use copyfile::utility::helper::{init_logger, print_error, print_usage, success_message};
use std::process;

fn main() {
    init_logger();

    if let Err(e) = run() {
        print_error(&e);
        if e.is_usage() {
            print_usage();
        }
        process::exit(1);
    }
}

fn run() -> CopyResult<()> {
    let options = CopyOptions::default();
    let invocation = CLIArgs::parse(&options)?;
    copy_file(&invocation, &options)?;
    println!("{}", success_message(&invocation));
    Ok(())
}
