pub mod catalog_scraper;
pub mod collector;
pub mod extractor;
pub mod html_parser;
