use crate::model::{GeneGroups, LabelSet};
use crate::pipeline::stage2_select::GeneSelection;
use crate::pipeline::stage3_evaluate::PathwayVerdict;

pub const DEFAULT_DETAIL_HEADER: &str =
    "rank\thit\tasterisk_mark\tgene_name\tKO\tthreshold\tscore\te_value\tKO_definition";
pub const GENE_SEPARATOR_WIDTH: usize = 100;

pub fn render_labels(labels: &LabelSet) -> Vec<String> {
    labels.iter().cloned().collect()
}

pub fn render_verdicts(verdicts: &[PathwayVerdict]) -> Vec<String> {
    verdicts
        .iter()
        .map(|v| format!("{}\t{}", v.pathway_name, v.mark()))
        .collect()
}

/// Builds the detail header from the table's own comment header when present.
pub fn detail_header(header: Option<&str>) -> String {
    match header {
        Some(line) => {
            let stripped = line.trim_start_matches('#');
            let cols: Vec<&str> = stripped.split('\t').skip(1).collect();
            format!("rank\thit\tasterisk_mark\t{}", cols.join("\t"))
        }
        None => DEFAULT_DETAIL_HEADER.to_string(),
    }
}

/// Per-gene blocks of ranked rows. Rows past `detail_top` are only shown when marked.
pub fn render_detail(
    groups: &GeneGroups,
    selections: &[GeneSelection],
    header: Option<&str>,
    detail_top: usize,
) -> Vec<String> {
    let mut out = vec![detail_header(header)];
    let separator = "-".repeat(GENE_SEPARATOR_WIDTH);

    for (gene_idx, (gene, selection)) in groups.iter().zip(selections).enumerate() {
        if gene_idx > 0 {
            out.push(separator.clone());
        }
        for (idx, hit) in gene.hits.iter().enumerate() {
            if idx >= detail_top && !hit.marked() {
                continue;
            }
            let hit_mark = if selection.selected.contains(&idx) { "Y" } else { "" };
            let asterisk_mark = if hit.marked() { "*" } else { "" };
            out.push(format!(
                "{}\t{}\t{}\t{}",
                idx + 1,
                hit_mark,
                asterisk_mark,
                hit.display_fields().join("\t")
            ));
        }
    }
    out
}
