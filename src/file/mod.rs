//! File I/O for JSON documents.
//!
//! This module loads JSON documents from disk or stdin for the command-line tool.

pub mod loader;
