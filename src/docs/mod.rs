//! Disease Documentation
//!
//! Renders supplementary per-disease documentation for display next to the
//! recommendation table.
//!
//! The dialect is a small markdown subset: headings, bold/italic, pipe
//! tables, blockquotes, unordered lists, paragraphs. Unsupported constructs
//! pass through as literal text. Rendering runs in two passes: line
//! classification into typed blocks (`blocks`), then HTML emission (`html`).

pub mod blocks;
pub mod html;
pub mod index;

pub use blocks::{classify, Block};
pub use html::render;
pub use index::DocumentationIndex;
