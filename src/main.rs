mod cli;
mod error;
mod fmt;
mod logging;
mod models;
mod settings;
mod store;
mod tui;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let settings = settings::load_settings();

    if let Err(e) = logging::init_logging(&settings.log_level, &settings::log_dir()) {
        eprintln!("Warning: {e}");
    }

    let result = match cli.command {
        None => cli::tracker::run(&settings, cli.empty),
        Some(Commands::Demo) => cli::demo::run(),
        Some(Commands::Init {
            name,
            seed,
            no_seed,
        }) => cli::init::run(name, seed, no_seed),
    };

    if let Err(e) = result {
        log::error!("event=app_error error={e}");
        logging::flush();
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    logging::flush();
}
