//! Business logic services for the directory back office

pub mod analytics;
pub mod catalog;
pub mod enquiry;
pub mod listing;

pub use analytics::AnalyticsRecorder;
pub use catalog::CatalogService;
pub use enquiry::EnquiryService;
pub use listing::ListingDirectory;
