//! C-ABI FFI bindings for cross-language integration.
//!
//! A PHP host (through PHP FFI) or any C caller passes the raw
//! `documents.get` JSON it already fetched and gets back Markdown, a
//! content record or a preview as a string.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::convert::{self, ConvertOptions};
use crate::parser::{DocsParser, ParseOptions};
use crate::post::generate_excerpt;
use crate::render::{self, JsonFormat, RenderOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct DocpressResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `docpress_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `docpress_free_result`.
    pub error: *mut c_char,
}

impl DocpressResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

impl From<crate::Result<String>> for DocpressResult {
    fn from(result: crate::Result<String>) -> Self {
        match result {
            Ok(data) => DocpressResult::success(data),
            Err(e) => DocpressResult::error(e.to_string()),
        }
    }
}

unsafe fn input_str<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, DocpressResult> {
    if ptr.is_null() {
        return Err(DocpressResult::error(format!("{} cannot be null", what)));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| DocpressResult::error(format!("Invalid UTF-8 {}", what)))
}

/// Convert Docs JSON to a content record, returned as JSON.
///
/// Malformed elements are skipped; the returned object has `record` and
/// `diagnostics` fields.
///
/// # Safety
///
/// The `json` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docpress_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docpress_convert_json(json: *const c_char) -> DocpressResult {
    let json = match input_str(json, "JSON") {
        Ok(s) => s,
        Err(e) => return e,
    };

    convert_internal(json).into()
}

fn convert_internal(json: &str) -> crate::Result<String> {
    let outcome = convert::convert_json(json, &ConvertOptions::new().lenient())?;
    render::to_json(&outcome, JsonFormat::Compact)
}

/// Convert Docs JSON to Markdown.
///
/// # Safety
///
/// The `json` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docpress_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docpress_to_markdown(json: *const c_char) -> DocpressResult {
    let json = match input_str(json, "JSON") {
        Ok(s) => s,
        Err(e) => return e,
    };

    to_markdown_internal(json).into()
}

fn to_markdown_internal(json: &str) -> crate::Result<String> {
    let parsed = DocsParser::from_json_with_options(json, ParseOptions::new().lenient())?.parse()?;
    Ok(render::to_markdown(&parsed.document, &RenderOptions::default()))
}

/// Summarize Docs JSON as a preview object (JSON).
///
/// # Safety
///
/// The `json` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docpress_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docpress_preview_json(
    json: *const c_char,
    max_length: usize,
) -> DocpressResult {
    let json = match input_str(json, "JSON") {
        Ok(s) => s,
        Err(e) => return e,
    };

    preview_internal(json, max_length).into()
}

fn preview_internal(json: &str, max_length: usize) -> crate::Result<String> {
    let parsed = DocsParser::from_json_with_options(json, ParseOptions::new().lenient())?.parse()?;
    let preview = convert::preview(&parsed.document, max_length);
    render::to_json(&preview, JsonFormat::Compact)
}

/// Build a plain-text excerpt of Markdown text.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `docpress_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docpress_generate_excerpt(
    text: *const c_char,
    max_length: usize,
) -> DocpressResult {
    match input_str(text, "Text") {
        Ok(s) => DocpressResult::success(generate_excerpt(s, max_length)),
        Err(e) => e,
    }
}

/// Free a result returned by any docpress function.
///
/// # Safety
///
/// The `result` must have been returned by a docpress function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn docpress_free_result(result: DocpressResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by docpress.
///
/// # Safety
///
/// The `ptr` must have been allocated by docpress.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn docpress_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the docpress library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn docpress_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"title": "T", "body": {"content": [
        {"paragraph": {"elements": [{"textRun": {"content": "Tags: x\n"}}]}},
        {"paragraph": {"elements": [{"textRun": {"content": "Hello world\n"}}]}}
    ]}}"#;

    unsafe fn take_data(result: DocpressResult) -> String {
        assert!(result.success);
        let data = CStr::from_ptr(result.data).to_str().unwrap().to_string();
        docpress_free_result(result);
        data
    }

    #[test]
    fn test_version() {
        let version = docpress_version();
        assert!(!version.is_null());
    }

    #[test]
    fn test_null_input() {
        unsafe {
            let result = docpress_convert_json(ptr::null());
            assert!(!result.success);
            assert!(!result.error.is_null());
            docpress_free_result(result);
        }
    }

    #[test]
    fn test_invalid_json() {
        let input = CString::new("{oops").unwrap();
        unsafe {
            let result = docpress_to_markdown(input.as_ptr());
            assert!(!result.success);
            docpress_free_result(result);
        }
    }

    #[test]
    fn test_convert_json() {
        let input = CString::new(DOC).unwrap();
        let data = unsafe { take_data(docpress_convert_json(input.as_ptr())) };
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["record"]["tags"][0], "x");
        assert_eq!(value["record"]["body"], "Hello world");
    }

    #[test]
    fn test_to_markdown() {
        let input = CString::new(DOC).unwrap();
        let data = unsafe { take_data(docpress_to_markdown(input.as_ptr())) };
        assert_eq!(data, "Tags: x\n\nHello world");
    }

    #[test]
    fn test_preview_and_excerpt() {
        let input = CString::new(DOC).unwrap();
        let data = unsafe { take_data(docpress_preview_json(input.as_ptr(), 300)) };
        assert!(data.contains("\"word_count\":2"));

        let text = CString::new("one two three four five").unwrap();
        let excerpt = unsafe { take_data(docpress_generate_excerpt(text.as_ptr(), 10)) };
        assert_eq!(excerpt, "one two...");
    }
}
