use std::collections::BTreeSet;

use crate::model::{GeneGroups, HitRecord, LabelSet};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectParams {
    /// Number of leading rows eligible when a gene has no marked hit.
    pub top_n: usize,
    /// Minimum `score / threshold`; callers validate it lies in (0, 1).
    pub min_score_ratio: Option<f64>,
}

impl Default for SelectParams {
    fn default() -> Self {
        Self {
            top_n: 1,
            min_score_ratio: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneSelection {
    pub gene: String,
    pub selected: BTreeSet<usize>,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub selections: Vec<GeneSelection>,
    pub labels: LabelSet,
}

/// Indices of the hits accepted for one gene.
///
/// A marked hit anywhere in the list disables rank-based selection for the
/// whole gene, so the flag is computed before walking the indices.
pub fn select(hits: &[HitRecord], top_n: usize, min_score_ratio: Option<f64>) -> BTreeSet<usize> {
    let has_marked = hits.iter().any(HitRecord::marked);

    let mut selected = BTreeSet::new();
    for (idx, hit) in hits.iter().enumerate() {
        let by_rank = !has_marked && idx < top_n && passes_ratio(hit, min_score_ratio);
        if hit.marked() || by_rank {
            selected.insert(idx);
        }
    }
    selected
}

pub fn passes_ratio(hit: &HitRecord, min_score_ratio: Option<f64>) -> bool {
    let Some(ratio) = min_score_ratio else {
        return true;
    };
    let threshold = match hit.threshold() {
        Some(t) if t != 0.0 => t,
        _ => return true,
    };
    hit.score().unwrap_or(0.0) / threshold >= ratio
}

pub fn run_stage2(groups: &GeneGroups, params: &SelectParams) -> Stage2Output {
    let mut selections = Vec::with_capacity(groups.n_genes());
    let mut labels = LabelSet::new();

    for gene in groups.iter() {
        let selected = select(&gene.hits, params.top_n, params.min_score_ratio);
        if selected.is_empty() {
            tracing::debug!("gene {}: no hit selected", gene.gene);
        }
        for &idx in &selected {
            labels.insert(gene.hits[idx].label().to_string());
        }
        selections.push(GeneSelection {
            gene: gene.gene.clone(),
            selected,
        });
    }

    tracing::info!(
        "selected {} distinct labels across {} genes (top={}, min_score_ratio={:?})",
        labels.len(),
        selections.len(),
        params.top_n,
        params.min_score_ratio
    );

    Stage2Output { selections, labels }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_select.rs"]
mod tests;
