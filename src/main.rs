mod definitions;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use thiserror::Error;

use crate::definitions::{DefinitionError, load_library};
use crate::input::{InputError, check_output_dir, load_labels, output_parent, require_file};
use crate::pipeline::stage1_group::run_stage1;
use crate::pipeline::stage2_select::{SelectParams, run_stage2};
use crate::pipeline::stage3_evaluate::run_stage3;
use crate::pipeline::stage4_report::{ReportError, Stage4Input, write_lines, write_reports};
use crate::report::text::{render_detail, render_labels, render_verdicts};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "kira-kofam",
    version,
    about = "Select KO assignments from KofamScan results and evaluate pathway definitions."
)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract selected KO numbers (or a ranked detail table) from a KofamScan result file.
    Select(SelectArgs),
    /// Evaluate pathway definitions against a KO list.
    Predict(PredictArgs),
    /// Select KOs and evaluate pathways in one pass, writing all reports to a directory.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct SelectionArgs {
    /// Number of top hits selected per gene when no hit is marked with an asterisk.
    #[arg(long, default_value_t = 1)]
    top: usize,
    /// Minimum score/threshold ratio for rank-based selection, in (0, 1).
    #[arg(long)]
    min_score_ratio: Option<f64>,
    /// Number of top hits shown per gene in the detail table.
    #[arg(long, default_value_t = 10)]
    detail_top: usize,
}

#[derive(Debug, Clone, Args)]
struct SelectArgs {
    /// KofamScan result TSV (plain or .gz).
    input: PathBuf,
    /// Output TSV.
    output: PathBuf,
    #[command(flatten)]
    selection: SelectionArgs,
    /// Write the ranked detail table instead of the KO list.
    #[arg(long)]
    detail: bool,
}

#[derive(Debug, Clone, Args)]
struct PredictArgs {
    /// Pathway definition JSON.
    definitions: PathBuf,
    /// KO list TSV (first column).
    labels: PathBuf,
    /// Output TSV of pathway verdicts.
    output: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    definitions: PathBuf,
    /// Existing, writable directory for the reports.
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    selection: SelectionArgs,
}

#[derive(Debug, Error, PartialEq)]
enum ConfigError {
    #[error("invalid --min-score-ratio {0}: must be strictly between 0 and 1")]
    RatioOutOfRange(f64),
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl SelectionArgs {
    fn params(&self) -> Result<SelectParams, ConfigError> {
        Ok(SelectParams {
            top_n: self.top,
            min_score_ratio: validate_ratio(self.min_score_ratio)?,
        })
    }
}

fn validate_ratio(ratio: Option<f64>) -> Result<Option<f64>, ConfigError> {
    match ratio {
        Some(r) if !(r > 0.0 && r < 1.0) => Err(ConfigError::RatioOutOfRange(r)),
        other => Ok(other),
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::Select(args) => run_select(&args),
        Command::Predict(args) => run_predict(&args),
        Command::Run(args) => run_pipeline(&args),
    }
}

fn run_select(args: &SelectArgs) -> Result<(), RunError> {
    let params = args.selection.params()?;
    require_file(&args.input, "input file")?;
    check_output_dir(&output_parent(&args.output))?;

    let grouped = run_stage1(&args.input)?;
    let stage2 = run_stage2(&grouped.groups, &params);

    let lines = if args.detail {
        render_detail(
            &grouped.groups,
            &stage2.selections,
            grouped.header.as_deref(),
            args.selection.detail_top,
        )
    } else {
        render_labels(&stage2.labels)
    };
    write_lines(&args.output, &lines)?;
    tracing::info!("output written to {}", args.output.display());
    Ok(())
}

fn run_predict(args: &PredictArgs) -> Result<(), RunError> {
    require_file(&args.definitions, "definition file")?;
    require_file(&args.labels, "input file")?;
    check_output_dir(&output_parent(&args.output))?;

    let library = load_library(&args.definitions)?;
    let labels = load_labels(&args.labels)?;
    let verdicts = run_stage3(&library, &labels);

    write_lines(&args.output, &render_verdicts(&verdicts))?;
    tracing::info!("output written to {}", args.output.display());
    Ok(())
}

fn run_pipeline(args: &RunArgs) -> Result<(), RunError> {
    let params = args.selection.params()?;
    require_file(&args.input, "input file")?;
    require_file(&args.definitions, "definition file")?;
    check_output_dir(&args.out)?;

    let library = load_library(&args.definitions)?;
    let grouped = run_stage1(&args.input)?;
    let stage2 = run_stage2(&grouped.groups, &params);
    let verdicts = run_stage3(&library, &stage2.labels);

    let input = Stage4Input {
        grouped: &grouped,
        selection: &stage2,
        verdicts: &verdicts,
        params,
        detail_top: args.selection.detail_top,
        input_path: &args.input,
        definitions_path: &args.definitions,
    };
    write_reports(&input, &args.out)?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
