use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use serde::Serialize;

use splicelens_core::models::{CountTrack, IntervalCollection};
use splicelens_stats::gap_fill::PLACEHOLDER_SEQID;
use splicelens_stats::{FiveNumberSummary, PerBaseStatistics, PlaceholderFields, fill_gaps};

#[derive(Serialize)]
struct SummarizeOutput {
    start: u32,
    end: u32,
    /// Largest non-outlier score over the whole track
    robust_axis_max: Option<f64>,
    summaries: Vec<FiveNumberSummary>,
}

fn summarize(track: &IntervalCollection, start: u32, end: u32) -> Result<SummarizeOutput> {
    let seqid = track
        .iter()
        .next()
        .map(|r| r.seqid.as_str())
        .unwrap_or(PLACEHOLDER_SEQID);

    let window = track.window(start, end);
    let filled = fill_gaps(&window, start, end, &PlaceholderFields::with_seqid(seqid))
        .context("Invalid window")?;

    Ok(SummarizeOutput {
        start,
        end,
        robust_axis_max: track.robust_axis_max(),
        summaries: filled.five_number_summaries(),
    })
}

pub fn run_summarize(matches: &ArgMatches) -> Result<()> {
    let start: u32 = matches
        .get_one::<String>("start")
        .expect("--start is required")
        .parse()
        .context("--start must be a non-negative integer")?;
    let end: u32 = matches
        .get_one::<String>("end")
        .expect("--end is required")
        .parse()
        .context("--end must be a non-negative integer")?;
    let output_path = matches.get_one::<String>("output");

    let track = match (
        matches.get_one::<String>("counts"),
        matches.get_one::<String>("scores"),
    ) {
        (Some(p), _) => CountTrack::try_from(p.as_str())
            .with_context(|| format!("Failed to load count table: {}", p))?
            .to_scored_intervals(),
        (None, Some(p)) => IntervalCollection::try_from(p.as_str())
            .with_context(|| format!("Failed to load BED file: {}", p))?
            .explode(),
        (None, None) => unreachable!("--counts or --scores is required"),
    };

    let output = summarize(&track, start, end)?;
    info!(
        "{} positions summarized in [{}, {}]",
        output.summaries.len(),
        start,
        end
    );

    let json =
        serde_json::to_string_pretty(&output).context("Failed to serialize output to JSON")?;

    match output_path {
        Some(p) => {
            let mut file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            file.write_all(json.as_bytes())?;
            info!("Output written to {}", p);
        }
        None => {
            io::stdout().write_all(json.as_bytes())?;
            println!();
        }
    }

    Ok(())
}
