use clap::Parser;
use git_refresh::cli::{self, Args};
use git_refresh::{logging, output};

fn main() {
    let args = Args::parse();
    logging::init(args.verbosity());

    if let Err(err) = cli::run(args) {
        output::print_fatal(&err);
        std::process::exit(1);
    }
}
