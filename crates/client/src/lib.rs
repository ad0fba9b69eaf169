//! Client code for partscope.
//!
//! This crate provides the part page extractors, the record assembler, and
//! the fetch pipeline shared by the server and CLI.

pub mod extract;
pub mod fetch;

pub use extract::{Document, Extractor, PartExtractor, Query, SimilarParts, extract_record};

pub use fetch::{FetchClient, FetchConfig, FetchResponse, ProxyConfig};
