//! HTTP handlers for the directory back office

pub mod assistant;
pub mod catalog;
pub mod enquiry;
pub mod health;
pub mod listing;

pub use assistant::*;
pub use catalog::*;
pub use enquiry::*;
pub use health::*;
pub use listing::*;
