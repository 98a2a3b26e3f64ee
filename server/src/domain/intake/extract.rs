//! Placeholder requirement extraction
//!
//! One requirement per non-empty line. Leading and trailing bullet markers
//! and whitespace are stripped from each line.

use crate::data::types::RequirementType;

const LINE_TRIM: &[char] = &[' ', '\t', '-', '•'];

/// A requirement candidate produced from free text
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRequirement {
    pub text: String,
    pub requirement_type: RequirementType,
    pub confidence: Option<f64>,
}

impl ExtractedRequirement {
    fn feature(text: &str) -> Self {
        Self {
            text: text.to_string(),
            requirement_type: RequirementType::Feature,
            confidence: None,
        }
    }
}

/// Split text into requirement candidates
///
/// Falls back to the whole trimmed text when no line survives trimming.
/// Returns nothing only when the input is blank.
pub fn extract_requirements(text: &str) -> Vec<ExtractedRequirement> {
    let normalized = text.replace('\r', "");
    let lines: Vec<_> = normalized
        .split('\n')
        .map(|line| line.trim_matches(LINE_TRIM))
        .filter(|line| !line.is_empty())
        .map(ExtractedRequirement::feature)
        .collect();
    if !lines.is_empty() {
        return lines;
    }

    let whole = text.trim();
    if whole.is_empty() {
        Vec::new()
    } else {
        vec![ExtractedRequirement::feature(whole)]
    }
}
