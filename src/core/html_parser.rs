use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ScrapeError;
use crate::model::page::{DepartmentLink, RawPage};

pub(crate) const COURSE_BLOCK_MARKER: &str = "div.courseblock";
const SITEMAP_MARKER: &str = "div.sitemap";
const LINK_MARKER: &str = "a";

pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

/// All descendant text of an element with surrounding whitespace trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// One course's sub-document within a parsed listing page.
#[derive(Clone, Copy, Debug)]
pub struct CourseBlock<'a> {
    element: ElementRef<'a>,
}

impl<'a> CourseBlock<'a> {
    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }
}

/// Finds course blocks and department links in catalog markup.
pub struct BlockLocator {
    block: Selector,
    sitemap: Selector,
    link: Selector,
}

impl BlockLocator {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(BlockLocator {
            block: selector(COURSE_BLOCK_MARKER)?,
            sitemap: selector(SITEMAP_MARKER)?,
            link: selector(LINK_MARKER)?,
        })
    }

    pub fn parse(page: &RawPage) -> Html {
        Html::parse_document(&page.body)
    }

    /// Every course block in document order. A page without any is not an error.
    pub fn locate_blocks<'a>(&self, document: &'a Html) -> Vec<CourseBlock<'a>> {
        document
            .select(&self.block)
            .map(|element| CourseBlock { element })
            .collect()
    }

    /// Department listing links inside the first sitemap container of a faculty index page.
    ///
    /// Relative hrefs are resolved against the page URL. Anchors without an href, or
    /// whose href cannot be resolved, are skipped.
    pub fn locate_department_links(&self, page: &RawPage) -> Vec<DepartmentLink> {
        let document = Self::parse(page);
        let Some(container) = document.select(&self.sitemap).next() else {
            log::warn!("no sitemap container on {}", page.url);
            return Vec::new();
        };
        let base = Url::parse(&page.url).ok();

        let mut links = Vec::new();
        for anchor in container.select(&self.link) {
            let name = element_text(anchor);
            let Some(href) = anchor.value().attr("href").map(str::trim) else {
                log::warn!("department link `{}` on {} has no href", name, page.url);
                continue;
            };
            let resolved = match &base {
                Some(base) => base.join(href).map(String::from),
                None => Url::parse(href).map(String::from),
            };
            match resolved {
                Ok(url) => links.push(DepartmentLink { url, name }),
                Err(err) => log::warn!("cannot resolve department link {} on {}: {}", href, page.url, err),
            }
        }
        links
    }
}
