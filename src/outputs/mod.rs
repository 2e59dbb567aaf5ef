//! Output generation for fetched news.
//!
//! # Submodules
//!
//! - [`html`]: Renders a `FetchResult` as the filterable news page
//!
//! The JSON view needs no module of its own; `FetchResult` serializes
//! directly through `axum::Json`.

pub mod html;
