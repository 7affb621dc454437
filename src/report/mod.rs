pub mod json;
pub mod text;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SelectionSummary {
    pub top: usize,
    pub min_score_ratio: Option<f64>,
    pub detail_top: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountsSummary {
    pub n_genes: usize,
    pub n_hits: usize,
    pub n_dropped_rows: usize,
    pub n_genes_with_selection: usize,
    pub n_selected_labels: usize,
    pub n_pathways: usize,
    pub n_pathways_satisfied: usize,
    pub pathways_satisfied_fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub input: String,
    pub definitions: String,
    pub selection: SelectionSummary,
    pub counts: CountsSummary,
    pub satisfied_pathways: Vec<String>,
}

pub fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
