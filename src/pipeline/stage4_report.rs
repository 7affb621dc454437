use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::input::output_parent;

use crate::pipeline::stage1_group::GroupedHits;
use crate::pipeline::stage2_select::{SelectParams, Stage2Output};
use crate::pipeline::stage3_evaluate::PathwayVerdict;
use crate::report::json::render_summary_json;
use crate::report::text::{render_detail, render_labels, render_verdicts};
use crate::report::{CountsSummary, SelectionSummary, SummaryData, fraction};

pub const LABELS_FILE: &str = "ko_list.tsv";
pub const DETAIL_FILE: &str = "hits_detail.tsv";
pub const PATHWAYS_FILE: &str = "pathways.tsv";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct Stage4Input<'a> {
    pub grouped: &'a GroupedHits,
    pub selection: &'a Stage2Output,
    pub verdicts: &'a [PathwayVerdict],
    pub params: SelectParams,
    pub detail_top: usize,
    pub input_path: &'a Path,
    pub definitions_path: &'a Path,
}

/// Renders every report in memory, stages each one as a temp file in `out_dir`
/// and only then renames them into place.
///
/// A failed write or rename removes whatever was already moved into place, so
/// a failed run leaves none of the four reports behind.
pub fn write_reports(input: &Stage4Input<'_>, out_dir: &Path) -> Result<(), ReportError> {
    let labels = render_labels(&input.selection.labels);
    let detail = render_detail(
        &input.grouped.groups,
        &input.selection.selections,
        input.grouped.header.as_deref(),
        input.detail_top,
    );
    let verdicts = render_verdicts(input.verdicts);
    let summary = render_summary_json(&build_summary(input))?;

    let staged = vec![
        (out_dir.join(LABELS_FILE), stage(out_dir, &join_lines(&labels))?),
        (out_dir.join(DETAIL_FILE), stage(out_dir, &join_lines(&detail))?),
        (out_dir.join(PATHWAYS_FILE), stage(out_dir, &join_lines(&verdicts))?),
        (out_dir.join(SUMMARY_FILE), stage(out_dir, &summary)?),
    ];
    commit(staged)?;

    tracing::info!("reports written to {}", out_dir.display());
    Ok(())
}

pub fn build_summary(input: &Stage4Input<'_>) -> SummaryData {
    let n_pathways = input.verdicts.len();
    let satisfied_pathways: Vec<String> = input
        .verdicts
        .iter()
        .filter(|v| v.satisfied)
        .map(|v| v.pathway_name.clone())
        .collect();
    let n_genes_with_selection = input
        .selection
        .selections
        .iter()
        .filter(|s| !s.selected.is_empty())
        .count();

    SummaryData {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        input: input.input_path.display().to_string(),
        definitions: input.definitions_path.display().to_string(),
        selection: SelectionSummary {
            top: input.params.top_n,
            min_score_ratio: input.params.min_score_ratio,
            detail_top: input.detail_top,
        },
        counts: CountsSummary {
            n_genes: input.grouped.groups.n_genes(),
            n_hits: input.grouped.groups.n_hits(),
            n_dropped_rows: input.grouped.dropped_rows,
            n_genes_with_selection,
            n_selected_labels: input.selection.labels.len(),
            n_pathways,
            n_pathways_satisfied: satisfied_pathways.len(),
            pathways_satisfied_fraction: fraction(satisfied_pathways.len(), n_pathways),
        },
        satisfied_pathways,
    }
}

pub fn write_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
    write_text(path, &join_lines(lines))
}

pub fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp = stage(&output_parent(path), contents)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn join_lines(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Writes `contents` to a hidden temp file in `dir`; the file is deleted on drop
/// unless persisted.
fn stage(dir: &Path, contents: &str) -> std::io::Result<NamedTempFile> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".kira-kofam-")
        .tempfile_in(dir)?;
    {
        let mut w = BufWriter::new(tmp.as_file_mut());
        w.write_all(contents.as_bytes())?;
        w.flush()?;
    }
    Ok(tmp)
}

fn commit(staged: Vec<(PathBuf, NamedTempFile)>) -> std::io::Result<()> {
    let mut placed: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (target, tmp) in staged {
        // Remaining temp files are dropped (and deleted) on early return.
        if let Err(e) = tmp.persist(&target) {
            for path in &placed {
                if let Err(rm) = std::fs::remove_file(path) {
                    tracing::warn!("failed to remove partial report {}: {rm}", path.display());
                }
            }
            return Err(e.error);
        }
        placed.push(target);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
