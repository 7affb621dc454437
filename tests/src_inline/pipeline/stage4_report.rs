use super::*;
use crate::model::{Combinator, Pathway, PathwayLibrary, RuleNode};
use crate::pipeline::stage1_group::group_lines;
use crate::pipeline::stage2_select::run_stage2;
use crate::pipeline::stage3_evaluate::run_stage3;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_kofam_report_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn library() -> PathwayLibrary {
    PathwayLibrary {
        pathways: vec![
            Pathway {
                pathway_name: "PW1".to_string(),
                definition: RuleNode::Leaf {
                    combinator: Combinator::AllOf,
                    id_list: vec!["K00001".to_string(), "K00010".to_string()],
                    min: None,
                },
            },
            Pathway {
                pathway_name: "PW2".to_string(),
                definition: RuleNode::Leaf {
                    combinator: Combinator::OneOf,
                    id_list: vec!["K00010".to_string(), "K00099".to_string()],
                    min: None,
                },
            },
        ],
    }
}

#[test]
fn test_write_reports_creates_all_files() {
    let dir = make_temp_dir();
    let grouped = group_lines([
        "#\tgene name\tKO\tthrshld\tscore\tE-value\tKO definition",
        "\tgeneA\tK00001\t50\t80\t1e-10\tdesc",
        "\tgeneA\tK00002\t50\t40\t1e-5\tdesc",
        "*\tgeneB\tK00010\t50\t90\t1e-20\tdesc",
        "bad\trow",
    ]);
    let params = SelectParams {
        top_n: 1,
        min_score_ratio: None,
    };
    let selection = run_stage2(&grouped.groups, &params);
    let verdicts = run_stage3(&library(), &selection.labels);

    let input = Stage4Input {
        grouped: &grouped,
        selection: &selection,
        verdicts: &verdicts,
        params,
        detail_top: 10,
        input_path: Path::new("hits.tsv"),
        definitions_path: Path::new("defs.json"),
    };
    write_reports(&input, &dir).unwrap();

    let labels = std::fs::read_to_string(dir.join(LABELS_FILE)).unwrap();
    assert_eq!(labels, "K00001\nK00010\n");

    let pathways = std::fs::read_to_string(dir.join(PATHWAYS_FILE)).unwrap();
    assert_eq!(pathways, "PW1\tY\nPW2\tY\n");

    let detail = std::fs::read_to_string(dir.join(DETAIL_FILE)).unwrap();
    let lines: Vec<&str> = detail.lines().collect();
    assert_eq!(
        lines[0],
        "rank\thit\tasterisk_mark\tgene name\tKO\tthrshld\tscore\tE-value\tKO definition"
    );
    assert_eq!(lines[1], "1\tY\t\tgeneA\tK00001\t50\t80\t1e-10\tdesc");
    assert_eq!(lines[2], "2\t\t\tgeneA\tK00002\t50\t40\t1e-5\tdesc");
    assert_eq!(lines[3], "-".repeat(100));
    assert_eq!(lines[4], "1\tY\t*\tgeneB\tK00010\t50\t90\t1e-20\tdesc");

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join(SUMMARY_FILE)).unwrap()).unwrap();
    assert_eq!(summary["tool"], "kira-kofam");
    assert_eq!(summary["counts"]["n_genes"], 2);
    assert_eq!(summary["counts"]["n_hits"], 3);
    assert_eq!(summary["counts"]["n_dropped_rows"], 1);
    assert_eq!(summary["counts"]["n_selected_labels"], 2);
    assert_eq!(summary["counts"]["n_pathways_satisfied"], 2);
    assert_eq!(summary["selection"]["min_score_ratio"], serde_json::Value::Null);
    assert_eq!(summary["satisfied_pathways"][1], "PW2");
}

#[test]
fn test_build_summary_counts_unselected_genes() {
    let grouped = group_lines([
        "\tgeneA\tK00001\t100\t10\t1e-10\tdesc",
        "\tgeneB\tK00002\t10\t20\t1e-10\tdesc",
    ]);
    let params = SelectParams {
        top_n: 1,
        min_score_ratio: Some(0.5),
    };
    let selection = run_stage2(&grouped.groups, &params);
    let verdicts = run_stage3(&library(), &selection.labels);
    let input = Stage4Input {
        grouped: &grouped,
        selection: &selection,
        verdicts: &verdicts,
        params,
        detail_top: 5,
        input_path: Path::new("hits.tsv"),
        definitions_path: Path::new("defs.json"),
    };
    let summary = build_summary(&input);
    assert_eq!(summary.counts.n_genes, 2);
    assert_eq!(summary.counts.n_genes_with_selection, 1);
    assert_eq!(summary.counts.n_pathways_satisfied, 0);
    assert_eq!(summary.counts.pathways_satisfied_fraction, 0.0);
    assert_eq!(summary.selection.min_score_ratio, Some(0.5));
}

#[test]
fn test_write_lines_empty_creates_empty_file() {
    let dir = make_temp_dir();
    let path = dir.join("empty.tsv");
    write_lines(&path, &[]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_write_reports_failure_leaves_no_partial_output() {
    let dir = make_temp_dir();
    // A directory in place of one report makes its rename fail mid-commit.
    std::fs::create_dir_all(dir.join(PATHWAYS_FILE)).unwrap();

    let grouped = group_lines(["\tgeneA\tK00001\t50\t80\t1e-10\tdesc"]);
    let params = SelectParams::default();
    let selection = run_stage2(&grouped.groups, &params);
    let verdicts = run_stage3(&library(), &selection.labels);
    let input = Stage4Input {
        grouped: &grouped,
        selection: &selection,
        verdicts: &verdicts,
        params,
        detail_top: 10,
        input_path: Path::new("hits.tsv"),
        definitions_path: Path::new("defs.json"),
    };

    let err = write_reports(&input, &dir).unwrap_err();
    assert!(matches!(err, ReportError::Io(_)));

    assert!(!dir.join(LABELS_FILE).exists());
    assert!(!dir.join(DETAIL_FILE).exists());
    assert!(!dir.join(SUMMARY_FILE).exists());
    assert!(dir.join(PATHWAYS_FILE).is_dir());

    let leftovers: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name != PATHWAYS_FILE)
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
}

#[test]
fn test_write_text_replaces_existing_file() {
    let dir = make_temp_dir();
    let path = dir.join("summary.json");
    std::fs::write(&path, "old contents that are longer\n").unwrap();
    write_text(&path, "{}\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
}
