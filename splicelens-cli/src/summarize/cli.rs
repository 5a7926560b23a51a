use clap::{ArgGroup, Command, arg};

pub const SUMMARIZE_CMD: &str = "summarize";

pub fn create_summarize_cli() -> Command {
    Command::new(SUMMARIZE_CMD)
        .about("Five-number summaries of a gap-filled window of a per-base track, as JSON.")
        .arg_required_else_help(true)
        .arg(
            arg!(--counts <COUNTS>)
                .required(false)
                .help("Per-base nucleotide count table; scores are read depth"),
        )
        .arg(
            arg!(--scores <SCORES>)
                .required(false)
                .help("BED file of scored intervals"),
        )
        .group(
            ArgGroup::new("input")
                .args(["counts", "scores"])
                .required(true),
        )
        .arg(
            arg!(--start <START>)
                .required(true)
                .help("First position of the window (0-based)"),
        )
        .arg(
            arg!(--end <END>)
                .required(true)
                .help("Last position of the window (inclusive)"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output JSON path (default: stdout)"),
        )
}
