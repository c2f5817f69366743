use regex::Regex;

/// Whole-word / whole-phrase relevance test against a configured keyword set.
///
/// A term only matches when it is flanked by non-word characters or the
/// ends of the text, so `"soc"` matches `"SOC Analyst"` but not
/// `"Associate"`. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    terms: Vec<String>,
    pattern: Option<Regex>,
}

impl KeywordMatcher {
    /// Terms are trimmed and lowercased; blanks and repeats are dropped.
    /// An empty set never matches anything.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = Vec::new();
        for keyword in keywords {
            let term = keyword.as_ref().trim().to_lowercase();
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }

        let pattern = if terms.is_empty() {
            None
        } else {
            let alternatives = terms
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            // Escaped literals only, so the pattern always compiles.
            Regex::new(&format!(r"(?i)(?:^|\W)(?:{})(?:\W|$)", alternatives)).ok()
        };

        Self { terms, pattern }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(text),
            None => false,
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}
