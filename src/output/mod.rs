//! Output formatting module
//!
//! Provides two output formats:
//! - Rich terminal output with colors and tables
//! - JSON export

pub mod json;
pub mod tables;
pub mod terminal;

pub use json::{context_reports, print_json, print_json_line, ContextReport};
pub use terminal::{
    print_certificate_check, print_context_records, print_error, print_header, print_info,
    print_policy, print_resolution, print_success, print_warning,
};
