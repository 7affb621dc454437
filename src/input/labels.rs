use std::path::Path;

use crate::input::InputError;
use crate::input::reader::read_lines;
use crate::model::LabelSet;

/// Loads a label list: the first TAB-separated field of every non-blank line.
pub fn load_labels(path: &Path) -> Result<LabelSet, InputError> {
    let lines = read_lines(path)?;
    Ok(parse_labels(lines.iter().map(String::as_str)))
}

pub fn parse_labels<'a>(lines: impl IntoIterator<Item = &'a str>) -> LabelSet {
    let mut labels = LabelSet::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(label) = line.split('\t').next() {
            labels.insert(label.to_string());
        }
    }
    labels
}
