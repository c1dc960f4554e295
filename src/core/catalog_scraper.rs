use std::collections::HashMap;
use std::pin::pin;

use futures::StreamExt;

use crate::core::collector::CourseCollector;
use crate::core::extractor::CourseExtractor;
use crate::core::html_parser::BlockLocator;
use crate::error::ScrapeError;
use crate::http::fetcher::PageFetcher;
use crate::http::headers::default_request_headers;
use crate::model::course_record::CourseRecord;
use crate::model::faculty::{Faculty, FacultyFeed, FeedCapabilities};
use crate::model::page::RawPage;

#[derive(Clone, Debug)]
pub struct ScrapeOptions {
    pub headers: HashMap<String, String>,
    /// Listing pages fetched at once within a faculty. Results are consumed in
    /// catalog order regardless, so which duplicate wins does not change.
    pub concurrency: usize,
    /// Abort the run on the first page that cannot be fetched.
    pub fail_fast: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        ScrapeOptions {
            headers: default_request_headers(),
            concurrency: 1,
            fail_fast: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageFailure {
    pub url: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedBlock {
    pub url: String,
    pub reason: String,
}

/// Courses pulled from a single listing page.
#[derive(Debug, Default)]
pub struct PageOutcome {
    pub records: Vec<CourseRecord>,
    pub skipped: Vec<SkippedBlock>,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<CourseRecord>,
    pub pages_fetched: usize,
    pub failed_pages: Vec<PageFailure>,
    pub skipped_blocks: Vec<SkippedBlock>,
    pub duplicates_dropped: usize,
}

/// Drives fetch, locate, extract, and collect over a catalog of faculties.
pub struct CatalogScraper<F> {
    fetcher: F,
    locator: BlockLocator,
    extractor: CourseExtractor,
    options: ScrapeOptions,
}

impl<F: PageFetcher> CatalogScraper<F> {
    pub fn new(fetcher: F, options: ScrapeOptions) -> Result<Self, ScrapeError> {
        Ok(CatalogScraper {
            fetcher,
            locator: BlockLocator::new()?,
            extractor: CourseExtractor::new()?,
            options,
        })
    }

    pub async fn run(&self, catalog: &[Faculty]) -> Result<RunReport, ScrapeError> {
        let mut collector = CourseCollector::new();
        let mut report = RunReport::default();

        for faculty in catalog {
            log::info!("Scraping {} courses...", faculty.name);
            let before = collector.len();
            self.scrape_faculty(faculty, &mut collector, &mut report).await?;
            log::info!("Scraped {} courses from {}", collector.len() - before, faculty.name);
        }

        let collected = collector.len();
        report.records = collector.finalize();
        report.duplicates_dropped = collected - report.records.len();
        log::info!(
            "Total number of courses scraped: {} ({} duplicates dropped, {} blocks skipped, {} pages failed)",
            report.records.len(),
            report.duplicates_dropped,
            report.skipped_blocks.len(),
            report.failed_pages.len()
        );
        Ok(report)
    }

    async fn scrape_faculty(
        &self,
        faculty: &Faculty,
        collector: &mut CourseCollector,
        report: &mut RunReport,
    ) -> Result<(), ScrapeError> {
        let urls = match &faculty.feed {
            FacultyFeed::Pages(urls) => urls.clone(),
            FacultyFeed::Index(index_url) => {
                let index = match self.fetcher.fetch(index_url, &self.options.headers).await {
                    Ok(page) => page,
                    Err(err) => return self.page_failed(index_url, err, report),
                };
                report.pages_fetched += 1;
                let links = self.locator.locate_department_links(&index);
                for link in &links {
                    log::debug!("found department {} at {}", link.name, link.url);
                }
                links.into_iter().map(|link| link.url).collect()
            }
        };

        let fetches = futures::stream::iter(urls.iter())
            .map(move |url| async move { (url, self.fetcher.fetch(url, &self.options.headers).await) })
            .buffered(self.options.concurrency.max(1));
        let mut fetches = pin!(fetches);

        while let Some((url, result)) = fetches.next().await {
            let page = match result {
                Ok(page) => page,
                Err(err) => {
                    self.page_failed(url, err, report)?;
                    continue;
                }
            };
            report.pages_fetched += 1;

            let outcome = self.scrape_page(&page, faculty.capabilities);
            log::info!("Scraped {} courses from {}", outcome.records.len(), page.url);
            outcome.records.into_iter().for_each(|record| collector.add(record));
            report.skipped_blocks.extend(outcome.skipped);
        }
        Ok(())
    }

    fn page_failed(&self, url: &str, err: ScrapeError, report: &mut RunReport) -> Result<(), ScrapeError> {
        if self.options.fail_fast {
            log::error!("aborting run: {}", err);
            return Err(err);
        }
        log::warn!("skipping {}: {}", url, err);
        report.failed_pages.push(PageFailure {
            url: url.to_string(),
            reason: err.to_string(),
        });
        Ok(())
    }

    /// Extracts every course block on one listing page, skipping malformed ones.
    pub fn scrape_page(&self, page: &RawPage, capabilities: FeedCapabilities) -> PageOutcome {
        let document = BlockLocator::parse(page);
        let mut outcome = PageOutcome::default();

        for (index, block) in self.locator.locate_blocks(&document).iter().enumerate() {
            match self.extractor.extract(block, capabilities) {
                Ok(record) => outcome.records.push(record),
                Err(err) => {
                    log::warn!("skipping course block #{} on {}: {}", index + 1, page.url, err);
                    outcome.skipped.push(SkippedBlock {
                        url: page.url.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        outcome
    }
}
