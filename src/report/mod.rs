//! Report rendering.

pub mod generator;

pub use generator::{
    generate_failed_json, generate_failed_markdown, generate_json_report,
    generate_markdown_report, PageReport,
};
