//! Loads the corpus from its two dataset documents.
//!
//! A [`Source`] hands out raw documents, a [`Loader`] decodes and validates
//! them into a [`Corpus`](mushaf_index::Corpus), and a [`Store`] runs that
//! load at most once at a time and publishes its [`State`].

mod dto;
pub mod error;
mod load;
pub mod source;
mod store;

pub use crate::load::{DEFAULT_INDEX_DOCUMENT, DEFAULT_METADATA_DOCUMENT, Documents, Loader};
pub use crate::source::Source;
pub use crate::store::{State, Store};
use std::sync::Arc;

pub type SourceHandle = Arc<dyn Source>;
