//! Domain models for the directory back office

mod analytics;
mod business;
mod category;
mod enquiry;
mod user;

pub use analytics::*;
pub use business::*;
pub use category::*;
pub use enquiry::*;
pub use user::*;
