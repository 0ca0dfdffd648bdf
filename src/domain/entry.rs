/// One feed entry, reduced to what gets relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// The entry's own id, or its link when the feed gives none
    pub id: String,
    pub title: String,
    pub link: String,
    /// Markup text, normalized before sending
    pub description: Option<String>,
}

impl FeedEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            link: link.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// First message of every entry.
    pub fn headline(&self) -> String {
        format!("{} | More info: {}", self.title, self.link)
    }
}
