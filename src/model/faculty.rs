use serde::{Deserialize, Serialize};

/// Which optional markers a feed is known to expose.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct FeedCapabilities {
    pub learning_hours: bool,
}

impl Default for FeedCapabilities {
    fn default() -> Self {
        FeedCapabilities {
            learning_hours: true,
        }
    }
}

/// Where a faculty's course listings live.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum FacultyFeed {
    /// An index page linking to one listing page per department.
    Index(String),
    /// Listing pages scraped directly, in order.
    Pages(Vec<String>),
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Faculty {
    pub name: String,
    pub feed: FacultyFeed,
    pub capabilities: FeedCapabilities,
}

impl Faculty {
    pub fn index(name: &str, url: &str) -> Self {
        Faculty {
            name: name.to_string(),
            feed: FacultyFeed::Index(url.to_string()),
            capabilities: FeedCapabilities::default(),
        }
    }

    pub fn pages(name: &str, urls: &[&str]) -> Self {
        Faculty {
            name: name.to_string(),
            feed: FacultyFeed::Pages(urls.iter().map(|u| u.to_string()).collect()),
            capabilities: FeedCapabilities::default(),
        }
    }

    pub fn without_learning_hours(mut self) -> Self {
        self.capabilities.learning_hours = false;
        self
    }
}
