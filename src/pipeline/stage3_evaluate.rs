use crate::model::{Combinator, LabelSet, PathwayLibrary, RuleNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayVerdict {
    pub pathway_name: String,
    pub satisfied: bool,
}

impl PathwayVerdict {
    pub fn mark(&self) -> &'static str {
        if self.satisfied { "Y" } else { "N" }
    }
}

pub fn evaluate(node: &RuleNode, labels: &LabelSet) -> bool {
    match node {
        RuleNode::Leaf {
            combinator,
            id_list,
            min,
        } => {
            let present = id_list.iter().filter(|id| labels.contains(id.as_str()));
            combine(*combinator, present.count(), id_list.len(), *min)
        }
        RuleNode::Composite {
            combinator,
            children,
            min,
        } => {
            let satisfied = children.iter().filter(|c| evaluate(c, labels)).count();
            combine(*combinator, satisfied, children.len(), *min)
        }
    }
}

fn combine(combinator: Combinator, hits: usize, total: usize, min: Option<usize>) -> bool {
    match combinator {
        Combinator::AllOf => hits == total,
        Combinator::OneOf => hits > 0,
        Combinator::AtLeast => hits >= min.unwrap_or(total),
    }
}

pub fn run_stage3(library: &PathwayLibrary, labels: &LabelSet) -> Vec<PathwayVerdict> {
    let verdicts: Vec<PathwayVerdict> = library
        .pathways
        .iter()
        .map(|pw| PathwayVerdict {
            pathway_name: pw.pathway_name.clone(),
            satisfied: evaluate(&pw.definition, labels),
        })
        .collect();
    tracing::info!(
        "{} of {} pathways satisfied by {} labels",
        verdicts.iter().filter(|v| v.satisfied).count(),
        verdicts.len(),
        labels.len()
    );
    verdicts
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_evaluate.rs"]
mod tests;
