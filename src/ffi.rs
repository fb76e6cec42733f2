//! FFI interface for host interop
//!
//! Lets a host that already holds the page HTML get a [`JobRecord`] back as
//! JSON without linking the rest of the crate.
//!
//! [`JobRecord`]: crate::record::JobRecord

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::dom::HtmlDocument;
use crate::scrape::scrape;
use crate::sites::{MatchMode, SiteMap};

/// Result struct returned to the host
/// Both pointers are owned by Rust and must be freed via free_scrape_result
#[repr(C)]
pub struct ScrapeResultFFI {
    /// JSON-serialized JobRecord (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if scraping failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Scrape a job page into a JSON record.
///
/// # Arguments
/// * `url` - Page URL (null-terminated UTF-8)
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `strict_host` - Non-zero to match sites on the hostname only
///
/// # Safety
/// - `url` must be a valid null-terminated C string
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - Caller must free the result via `free_scrape_result`
#[no_mangle]
pub unsafe extern "C" fn scrape_job_page(
    url: *const c_char,
    html_ptr: *const c_char,
    html_len: usize,
    strict_host: u8,
) -> ScrapeResultFFI {
    let url = if url.is_null() {
        return make_error_result("URL is null");
    } else {
        match CStr::from_ptr(url).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in URL"),
        }
    };

    let html = if html_ptr.is_null() || html_len == 0 {
        ""
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in HTML content"),
        }
    };

    let mode = if strict_host != 0 {
        MatchMode::Host
    } else {
        MatchMode::Loose
    };
    let record = scrape(url, &HtmlDocument::parse(html), &SiteMap::new(mode));

    match serde_json::to_string(&record) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ScrapeResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize record: {}", e)),
    }
}

/// Free a ScrapeResultFFI returned by scrape_job_page
///
/// # Safety
/// - `result` must have been returned by `scrape_job_page`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_scrape_result(result: ScrapeResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ScrapeResultFFI {
    let error_ptr = CString::new(msg)
        .or_else(|_| CString::new("Unknown error"))
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut());
    ScrapeResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr,
    }
}
