//! Provides the main entry point to the program.
use chargesim::cli::run_cli;
use human_panic::setup_panic;

fn main() {
    setup_panic!();

    if let Err(err) = run_cli() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
