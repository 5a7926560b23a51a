mod render;
mod summarize;

use anyhow::Result;
use clap::{ArgAction, Command, arg};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "splicelens";
    pub const BIN_NAME: &str = "splicelens";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Overview and zoomed per-site views of splice donor/acceptor read support.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose "Log debug output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(render::cli::create_render_cli())
        .subcommand(summarize::cli::create_summarize_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();

    match matches.subcommand() {
        //
        // RENDER
        //
        Some((render::cli::RENDER_CMD, matches)) => {
            render::handlers::run_render(matches)?;
        }

        //
        // SUMMARIZE
        //
        Some((summarize::cli::SUMMARIZE_CMD, matches)) => {
            summarize::handlers::run_summarize(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
