//! Corpus assembly
//!
//! Merges persisted page records into one ordered, human-readable corpus
//! document per target.

mod corpus;

pub use corpus::{build_corpus, write_corpus};
