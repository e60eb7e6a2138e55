use serde::{Deserialize, Serialize};

/// Policy category of a classifier hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Electoral or political-influence activity.
    Political,
    /// Violence against persons.
    Violence,
    /// Other unlawful activity (laundering, bribery, smuggling, ...).
    Illegal,
    /// Evasion of the classifier itself: confusable scripts, invisible
    /// characters, oversized input.
    Obfuscation,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Political => write!(f, "political"),
            Self::Violence => write!(f, "violence"),
            Self::Illegal => write!(f, "illegal"),
            Self::Obfuscation => write!(f, "obfuscation"),
        }
    }
}

/// Verdict of one classification. Ephemeral: owned by the caller, never
/// persisted by the classifier itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Execution-blocking verdict. Callers must treat only this flag as
    /// blocking; advisory hits set category/matched with this false.
    pub prohibited: bool,
    pub category: Option<Category>,
    pub matched: Option<String>,
    /// Certainty of the verdict, 0..=100.
    pub confidence: u8,
}

impl Classification {
    /// No hit anywhere in the cascade.
    pub fn clean() -> Self {
        Self {
            prohibited: false,
            category: None,
            matched: None,
            confidence: 0,
        }
    }

    pub fn prohibited(category: Category, matched: impl Into<String>, confidence: u8) -> Self {
        Self {
            prohibited: true,
            category: Some(category),
            matched: Some(matched.into()),
            confidence,
        }
    }

    /// Audit-only hit: category and term recorded, execution not blocked.
    pub fn advisory(category: Category, matched: impl Into<String>, confidence: u8) -> Self {
        Self {
            prohibited: false,
            category: Some(category),
            matched: Some(matched.into()),
            confidence,
        }
    }

    /// Whether this verdict carries an audit-worthy advisory match.
    pub fn is_advisory(&self) -> bool {
        !self.prohibited && self.category.is_some()
    }
}
