use std::path::Path;

use crate::input::{InputError, read_lines};
use crate::model::{GeneGroups, HitRecord};

pub const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, Default)]
pub struct GroupedHits {
    /// First comment line of the table, kept verbatim for display.
    pub header: Option<String>,
    pub groups: GeneGroups,
    pub dropped_rows: usize,
}

pub fn run_stage1(path: &Path) -> Result<GroupedHits, InputError> {
    let lines = read_lines(path)?;
    let grouped = group_lines(lines.iter().map(String::as_str));
    if grouped.groups.is_empty() {
        tracing::warn!("no hit rows found in {}", path.display());
    }
    tracing::info!(
        "grouped {} hits into {} genes from {}",
        grouped.groups.n_hits(),
        grouped.groups.n_genes(),
        path.display()
    );
    Ok(grouped)
}

pub fn group_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> GroupedHits {
    let mut header: Option<String> = None;
    let mut groups = GeneGroups::new();
    let mut dropped_rows = 0usize;

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.trim_end();
        if line.starts_with(COMMENT_MARKER) {
            if header.is_none() {
                header = Some(line.to_string());
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        match HitRecord::from_line(line) {
            Some(hit) => groups.push(hit),
            None => {
                dropped_rows += 1;
                tracing::debug!("dropping malformed row (line {})", idx + 1);
            }
        }
    }

    for gene in groups.iter() {
        tracing::trace!("gene {}: {} hits", gene.gene, gene.hits.len());
    }

    GroupedHits {
        header,
        groups,
        dropped_rows,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_group.rs"]
mod tests;
