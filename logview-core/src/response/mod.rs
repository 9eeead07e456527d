//! Request handling: source lookup, filter and view selection, and byte
//! range slicing of the rendered body.

mod handler;
mod negotiate;
mod range;


pub use handler::{
    FILE_NOT_FOUND, INVALID_FILE_URL, INVALID_RANGE, LogRequest, LogResponse, handle_log_request,
};
pub use negotiate::{QueryParams, select_filter, select_view, should_be_html, use_passthrough};
pub use range::{ByteRange, RangeError, RangeSlicer};
