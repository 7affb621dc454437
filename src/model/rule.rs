use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    AllOf,
    OneOf,
    AtLeast,
}

impl Combinator {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all_of" => Some(Self::AllOf),
            "one_of" => Some(Self::OneOf),
            "at_least" => Some(Self::AtLeast),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllOf => "all_of",
            Self::OneOf => "one_of",
            Self::AtLeast => "at_least",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a pathway definition tree.
///
/// `min` only matters for [`Combinator::AtLeast`]; when absent the node
/// requires every id (leaf) or every child (composite).
#[derive(Debug, Clone, PartialEq)]
pub enum RuleNode {
    Leaf {
        combinator: Combinator,
        id_list: Vec<String>,
        min: Option<usize>,
    },
    Composite {
        combinator: Combinator,
        children: Vec<RuleNode>,
        min: Option<usize>,
    },
}

impl RuleNode {
    pub fn combinator(&self) -> Combinator {
        match self {
            Self::Leaf { combinator, .. } | Self::Composite { combinator, .. } => *combinator,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Composite { children, .. } => {
                1 + children.iter().map(RuleNode::depth).max().unwrap_or(0)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pathway {
    pub pathway_name: String,
    pub definition: RuleNode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathwayLibrary {
    pub pathways: Vec<Pathway>,
}

impl PathwayLibrary {
    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }
}
