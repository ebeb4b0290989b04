//! Academic vs. non-academic heuristic for author and affiliation strings.

use std::fmt;

/// Substrings that mark an affiliation as academic (matched lower-cased).
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "lab",
    "laboratory",
];

/// Result of classifying an author or affiliation string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affiliation {
    Academic,
    NonAcademic,
}

impl Affiliation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Affiliation::Academic => "academic",
            Affiliation::NonAcademic => "non-academic",
        }
    }

    pub fn is_academic(&self) -> bool {
        matches!(self, Affiliation::Academic)
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a string by case-insensitive substring match against [`ACADEMIC_KEYWORDS`].
pub fn classify(text: &str) -> Affiliation {
    let lower = text.to_lowercase();
    if ACADEMIC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        Affiliation::Academic
    } else {
        Affiliation::NonAcademic
    }
}
