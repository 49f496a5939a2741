use std::fmt;

/// Issue search restricted to one author's pull requests in a date window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    author: String,
    created: String,
    state: Option<String>,
}

impl SearchQuery {
    pub fn new(author: impl Into<String>, created: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            created: created.into(),
            state: None,
        }
    }

    /// Add a `state:` clause; an empty value leaves the query unfiltered
    pub fn with_state(mut self, state: &str) -> Self {
        let state = state.trim();
        self.state = (!state.is_empty()).then(|| state.to_string());
        self
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "author:{} created:{} type:pr", self.author, self.created)?;
        if let Some(state) = &self.state {
            write!(f, " state:{}", state)?;
        }
        Ok(())
    }
}
