use std::path::Path;

use crate::definitions::DefinitionError;
use crate::definitions::raw::{RawDocument, RawNode, RawPathway};
use crate::model::{Combinator, Pathway, PathwayLibrary, RuleNode};

pub fn load_library(path: &Path) -> Result<PathwayLibrary, DefinitionError> {
    let text = std::fs::read_to_string(path)?;
    let library = parse_library(&text)?;
    if library.is_empty() {
        tracing::warn!("no pathways defined in {}", path.display());
    }
    tracing::info!(
        "loaded {} pathway definitions from {}",
        library.len(),
        path.display()
    );
    Ok(library)
}

pub fn parse_library(text: &str) -> Result<PathwayLibrary, DefinitionError> {
    let doc: RawDocument = serde_json::from_str(text)?;
    build_library(doc)
}

pub fn build_library(doc: RawDocument) -> Result<PathwayLibrary, DefinitionError> {
    let mut pathways = Vec::with_capacity(doc.pathway_list.len());
    for (idx, raw) in doc.pathway_list.into_iter().enumerate() {
        pathways.push(build_pathway(raw, idx)?);
    }
    Ok(PathwayLibrary { pathways })
}

fn build_pathway(raw: RawPathway, idx: usize) -> Result<Pathway, DefinitionError> {
    let Some(pathway_name) = raw.pathway_name else {
        return Err(invalid(
            &format!("pathway_list[{idx}]"),
            "pathway_name",
            "missing pathway_name",
        ));
    };
    let root = "definition";
    let Some(node) = raw.definition else {
        return Err(invalid(&pathway_name, root, "missing definition"));
    };
    let definition = build_node(node, &pathway_name, root)?;
    tracing::debug!(
        pathway = pathway_name.as_str(),
        root = %definition.combinator(),
        depth = definition.depth(),
        "built pathway definition"
    );
    Ok(Pathway {
        pathway_name,
        definition,
    })
}

fn build_node(raw: RawNode, pathway: &str, path: &str) -> Result<RuleNode, DefinitionError> {
    let combinator = match raw.kind.as_deref() {
        Some(kind) => Combinator::parse(kind).ok_or_else(|| {
            invalid(pathway, path, &format!("unrecognized combinator '{kind}'"))
        })?,
        None => return Err(invalid(pathway, path, "missing combinator 'type'")),
    };

    let min = raw.min.map(|m| clamp_min(m, pathway, path));

    if let Some(id_list) = raw.id_list {
        return Ok(RuleNode::Leaf {
            combinator,
            id_list,
            min,
        });
    }

    let subs = raw.list.unwrap_or_default();
    let mut children = Vec::with_capacity(subs.len());
    for (idx, sub) in subs.into_iter().enumerate() {
        let child_path = format!("{path}.list[{idx}]");
        children.push(build_node(sub, pathway, &child_path)?);
    }
    Ok(RuleNode::Composite {
        combinator,
        children,
        min,
    })
}

/// A negative bound is trivially met, same as zero.
fn clamp_min(min: i64, pathway: &str, path: &str) -> usize {
    if min < 0 {
        tracing::warn!(pathway, path, min, "negative min treated as 0");
        return 0;
    }
    usize::try_from(min).unwrap_or(usize::MAX)
}

fn invalid(pathway: &str, path: &str, reason: &str) -> DefinitionError {
    DefinitionError::InvalidDefinition {
        pathway: pathway.to_string(),
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
