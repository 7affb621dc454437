pub mod hit;
pub mod rule;

pub use hit::{GeneGroups, HitRecord, LabelSet};
pub use rule::{Combinator, Pathway, PathwayLibrary, RuleNode};
