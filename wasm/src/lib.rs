//! WebAssembly module for the directory back office
//!
//! Provides client-side computation for:
//! - Enquiry form validation before submit
//! - Admin directory search and pagination
//! - Page button windows

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::directory::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Outcome of validating the enquiry form in the browser
#[derive(Debug, Serialize)]
struct FormCheck {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    enquiry: Option<NewEnquiry>,
    errors: Vec<FieldViolation>,
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    web_sys::console::debug_1(&JsValue::from_str("dirdesk wasm helpers loaded"));
}

fn check_enquiry(input_json: &str) -> Result<String, String> {
    let input: EnquirySubmission =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid enquiry JSON: {}", e))?;

    let check = match validate_enquiry(&input) {
        Ok(enquiry) => FormCheck {
            valid: true,
            enquiry: Some(enquiry),
            errors: Vec::new(),
        },
        Err(failure) => FormCheck {
            valid: false,
            enquiry: None,
            errors: failure.violations,
        },
    };
    serde_json::to_string(&check).map_err(|e| e.to_string())
}

fn search_listings(listings_json: &str, query: &str, page: u32, page_size: u32) -> Result<String, String> {
    let listings: Vec<Business> = serde_json::from_str(listings_json)
        .map_err(|e| format!("Invalid listings JSON: {}", e))?;

    let filtered = filter_records(&listings, query);
    let total_pages = page_count(filtered.len(), page_size);
    let pagination = Pagination::new(clamp_page(page, total_pages), page_size);

    serde_json::to_string(&paginate(&filtered, pagination)).map_err(|e| e.to_string())
}

/// Validate an enquiry form, reporting every failing field
///
/// Returns `{"valid", "enquiry"?, "errors"}` as JSON.
#[wasm_bindgen]
pub fn validate_enquiry_json(input_json: &str) -> Result<String, JsValue> {
    check_enquiry(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Filter listings by name or city and cut out one page
#[wasm_bindgen]
pub fn search_listings_json(
    listings_json: &str,
    query: &str,
    page: u32,
    page_size: u32,
) -> Result<String, JsValue> {
    search_listings(listings_json, query, page, page_size).map_err(|e| JsValue::from_str(&e))
}

/// Numbered page buttons to show around the current page
#[wasm_bindgen]
pub fn listing_page_buttons(current: u32, total_pages: u32) -> Vec<u32> {
    page_buttons(current, total_pages)
}

/// Name and city of a listing row as rendered in the admin table
struct ListingText<'a> {
    business_name: &'a str,
    city: Option<&'a str>,
}

impl Searchable for ListingText<'_> {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.business_name];
        fields.extend(self.city);
        fields
    }
}

/// Whether a search string matches a listing's name or city
#[wasm_bindgen]
pub fn listing_matches(business_name: &str, city: Option<String>, query: &str) -> bool {
    let listing = ListingText {
        business_name,
        city: city.as_deref(),
    };
    matches_query(&listing, query)
}
