use serde::{Deserialize, Serialize};

/// Markup returned by a fetch, tagged with the URL it came from.
#[derive(Clone, Debug)]
pub struct RawPage {
    pub url: String,
    pub body: String,
}

impl RawPage {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        RawPage {
            url: url.into(),
            body: body.into(),
        }
    }
}

/// A department listing linked from a faculty index page.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct DepartmentLink {
    pub url: String,
    pub name: String,
}
