use clap::{Arg, ArgAction, Command, arg};

pub const RENDER_CMD: &str = "render";

pub fn create_render_cli() -> Command {
    Command::new(RENDER_CMD)
        .about("Render the gene model overview and zoomed splice-site panels to SVG.")
        .arg_required_else_help(true)
        .arg(
            arg!(--gtf <GTF>)
                .required(true)
                .help("Path to GTF/GTF.gz transcript model"),
        )
        .arg(
            Arg::new("donor-counts")
                .long("donor-counts")
                .required(false)
                .help("Per-base nucleotide counts (seqid, position, A, C, G, T, N) at donor sites"),
        )
        .arg(
            Arg::new("acceptor-counts")
                .long("acceptor-counts")
                .required(false)
                .help("Per-base nucleotide counts at acceptor sites"),
        )
        .arg(
            Arg::new("donor-scores")
                .long("donor-scores")
                .required(false)
                .help("BED file of donor scores (default: read depth from --donor-counts)"),
        )
        .arg(
            Arg::new("acceptor-scores")
                .long("acceptor-scores")
                .required(false)
                .help("BED file of acceptor scores (default: read depth from --acceptor-counts)"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("TOML render configuration"),
        )
        .arg(
            Arg::new("zoom-width")
                .long("zoom-width")
                .required(false)
                .help("Bases either side of each site in its detail panel (overrides config)"),
        )
        .arg(
            Arg::new("genome-length")
                .long("genome-length")
                .required(false)
                .help("Overview axis length (default: largest exon end)"),
        )
        .arg(
            Arg::new("no-outliers")
                .long("no-outliers")
                .action(ArgAction::SetTrue)
                .help("Do not draw outlier markers"),
        )
        .arg(
            Arg::new("no-logos")
                .long("no-logos")
                .action(ArgAction::SetTrue)
                .help("Do not draw sequence logos"),
        )
        .arg(
            arg!(--title <TITLE>)
                .required(false)
                .help("Figure title"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(true)
                .help("Output SVG path"),
        )
}
