use std::collections::{BTreeSet, HashMap};

pub const MIN_FIELDS: usize = 7;
pub const MARKER: &str = "*";

const FIELD_MARKER: usize = 0;
const FIELD_GENE: usize = 1;
const FIELD_LABEL: usize = 2;
const FIELD_THRESHOLD: usize = 3;
const FIELD_SCORE: usize = 4;

/// Sorted, de-duplicated set of functional-category labels (KO ids).
pub type LabelSet = BTreeSet<String>;

/// One row of a KofamScan hit table.
///
/// `gene` and `label` are read back out of `raw_fields`, so they always agree
/// with the pass-through columns.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRecord {
    marked: bool,
    threshold: Option<f64>,
    score: Option<f64>,
    raw_fields: Vec<String>,
}

impl HitRecord {
    /// Returns `None` for rows with fewer than [`MIN_FIELDS`] columns.
    pub fn from_fields(raw_fields: Vec<String>) -> Option<Self> {
        if raw_fields.len() < MIN_FIELDS {
            return None;
        }
        let marked = raw_fields[FIELD_MARKER] == MARKER;
        let threshold = parse_optional_f64(&raw_fields[FIELD_THRESHOLD]);
        let score = parse_optional_f64(&raw_fields[FIELD_SCORE]);
        Some(Self {
            marked,
            threshold,
            score,
            raw_fields,
        })
    }

    pub fn from_line(line: &str) -> Option<Self> {
        Self::from_fields(line.split('\t').map(str::to_string).collect())
    }

    pub fn marked(&self) -> bool {
        self.marked
    }

    pub fn gene(&self) -> &str {
        &self.raw_fields[FIELD_GENE]
    }

    pub fn label(&self) -> &str {
        &self.raw_fields[FIELD_LABEL]
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Original columns without the marker column.
    pub fn display_fields(&self) -> &[String] {
        &self.raw_fields[FIELD_MARKER + 1..]
    }
}

fn parse_optional_f64(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneHits {
    pub gene: String,
    pub hits: Vec<HitRecord>,
}

/// Hits keyed by gene, in first-seen gene order and file order within a gene.
#[derive(Debug, Clone, Default)]
pub struct GeneGroups {
    genes: Vec<GeneHits>,
    index: HashMap<String, usize>,
}

impl GeneGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hit: HitRecord) {
        match self.index.get(hit.gene()) {
            Some(&idx) => self.genes[idx].hits.push(hit),
            None => {
                let gene = hit.gene().to_string();
                self.index.insert(gene.clone(), self.genes.len());
                self.genes.push(GeneHits {
                    gene,
                    hits: vec![hit],
                });
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneHits> {
        self.genes.iter()
    }

    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn n_hits(&self) -> usize {
        self.genes.iter().map(|g| g.hits.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/hit.rs"]
mod tests;
