use regex::RegexBuilder;
use serde::Serialize;
use std::ops::Range;

/// A title with at most one marked span: the first case-insensitive
/// occurrence of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedTitle {
    pub text: String,
    pub matched: Option<Range<usize>>, // byte range into `text`
}

impl HighlightedTitle {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: None,
        }
    }

    /// Marks the first case-insensitive match of `query` in `text`. The query
    /// is matched literally; regex metacharacters in it have no meaning.
    pub fn new(text: &str, query: &str) -> Self {
        if query.is_empty() {
            return Self::plain(text);
        }

        let matched = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .ok()
            .and_then(|re| re.find(text))
            .map(|m| m.range());

        Self {
            text: text.to_string(),
            matched,
        }
    }

    /// `(before, matched, after)`; `matched` is `None` when nothing matched.
    pub fn parts(&self) -> (&str, Option<&str>, &str) {
        match &self.matched {
            Some(range) => (
                &self.text[..range.start],
                Some(&self.text[range.clone()]),
                &self.text[range.end..],
            ),
            None => (self.text.as_str(), None, ""),
        }
    }

    /// Renders the title, passing the matched span through `mark`.
    pub fn render(&self, mark: impl Fn(&str) -> String) -> String {
        match self.parts() {
            (before, Some(matched), after) => format!("{}{}{}", before, mark(matched), after),
            (before, None, _) => before.to_string(),
        }
    }
}
