pub mod scrape;

pub use scrape::ScrapeError;
