//! Text scanning primitives shared by the cascade stages.

use crate::terms::LEET_SUBSTITUTIONS;

/// Input prepared once per classification: the raw text plus its
/// lowercased form. Stages never re-lowercase.
pub struct ScanText<'a> {
    pub raw: &'a str,
    pub lower: String,
}

impl<'a> ScanText<'a> {
    pub fn prepare(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
        }
    }
}

/// Substring search constrained to word boundaries: the match may not be
/// preceded or followed by an alphanumeric character.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();

        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);

        if before_ok && after_ok {
            return true;
        }
        // Step past this occurrence and keep looking.
        start = begin + needle.len();
        if start >= haystack.len() {
            break;
        }
    }
    false
}

/// Apply the fixed single-character leet substitutions.
pub fn leet_normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            LEET_SUBSTITUTIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_boundary_respects_edges() {
        assert!(contains_word("cast your vote today", "vote"));
        assert!(contains_word("vote", "vote"));
        assert!(contains_word("a vote.", "vote"));
    }

    #[test]
    fn word_boundary_rejects_substrings() {
        assert!(!contains_word("a devoted reader", "vote"));
        assert!(!contains_word("they voted", "vote"));
        assert!(!contains_word("market impact analysis", "pac"));
        assert!(!contains_word("bombastic prose", "bomb"));
    }

    #[test]
    fn word_boundary_finds_later_occurrence() {
        // First occurrence is embedded, second stands alone.
        assert!(contains_word("devoted to the vote", "vote"));
    }

    #[test]
    fn leet_normalization() {
        assert_eq!(leet_normalize("3lect1on"), "election");
        assert_eq!(leet_normalize("c@mp4ign"), "campaign");
        assert_eq!(leet_normalize("plain text"), "plain text");
    }
}
