use serde::Deserialize;

/// Rule document exactly as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub pathway_list: Vec<RawPathway>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPathway {
    #[serde(default)]
    pub pathway_name: Option<String>,
    #[serde(default)]
    pub definition: Option<RawNode>,
}

/// A node carrying `id_list` is a leaf; anything else is a composite over `list`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id_list: Option<Vec<String>>,
    #[serde(default)]
    pub list: Option<Vec<RawNode>>,
    /// Signed so a negative bound reaches validation instead of failing to parse.
    #[serde(default)]
    pub min: Option<i64>,
}
