use sget_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible.
    logging::init();

    if let Err(err) = cli::run_from_args() {
        eprintln!("sget error: {:#}", err);
        std::process::exit(1);
    }
}
