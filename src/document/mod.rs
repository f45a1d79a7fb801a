//! Decoded JSON documents and the accessors built on them.

pub mod lazy;
pub mod materialize;
pub mod node;
pub mod parser;
pub mod tree;
