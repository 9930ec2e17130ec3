//! Run the full pipeline over a raw transcript and print JSON.
//!
//! Usage: `chatseg [options] <file>` where `<file>` is a raw conversation
//! text file, or `-` for stdin.

use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use chatseg::{
    detect_sections, generate_section_summary, merge_similar_sections, parse_raw_conversation,
    MergeOptions, ParseOptions, Section, SectionSummary, SegmentOptions,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    sections: Vec<Section>,
    summary: SectionSummary,
}

struct Args {
    input: String,
    segment: SegmentOptions,
    merge: MergeOptions,
    parse: ParseOptions,
}

const USAGE: &str = "usage: chatseg [--time-gap <minutes>] [--no-topic-changes] \
[--merge-threshold <0..1>] [--delimiter <text>] <file|->";

/// Returns `None` when the invocation only asked for usage text.
fn parse_args() -> Result<Option<Args>> {
    let mut input = None;
    let mut segment = SegmentOptions::default();
    let mut merge = MergeOptions::default();
    let mut parse = ParseOptions::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--time-gap" => {
                let value = args.next().context("--time-gap needs a value")?;
                segment.time_gap_minutes =
                    value.parse().context("--time-gap must be a whole number")?;
            }
            "--no-topic-changes" => segment.detect_topic_changes = false,
            "--merge-threshold" => {
                let value = args.next().context("--merge-threshold needs a value")?;
                merge.threshold = value.parse().context("--merge-threshold must be a number")?;
            }
            "--delimiter" => {
                parse.delimiter = args.next().context("--delimiter needs a value")?;
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(None);
            }
            other if other.starts_with("--") => bail!("unknown option {other:?}\n{USAGE}"),
            other if input.is_none() => input = Some(other.to_string()),
            other => bail!("unexpected argument {other:?}\n{USAGE}"),
        }
    }

    Ok(Some(Args {
        input: input.with_context(|| USAGE.to_string())?,
        segment,
        merge,
        parse,
    }))
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
    }
}

fn run() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };
    let text = read_input(&args.input)?;

    let messages = parse_raw_conversation(&text, &args.parse);
    let sections = detect_sections(&messages, &args.segment);
    let sections = merge_similar_sections(sections, &args.merge);
    let summary = generate_section_summary(&sections);

    let output = Output { sections, summary };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("chatseg: {err:#}");
            ExitCode::FAILURE
        }
    }
}
