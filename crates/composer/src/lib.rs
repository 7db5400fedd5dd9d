//! Context composition pipeline — the core architectural component.
//!
//! Prepares a bounded, relevance-ranked textual summary of a professional
//! profile for injection into a completion prompt:
//!
//! 1. **Relevance Selector** — scores categories against the user message
//! 2. **Budget Allocator** — walks categories in priority order, handing
//!    each the remaining budget, and stops when it is exhausted
//! 3. **Section Formatter** — renders a size-limited slice of one category
//!    into compact text
//!
//! Composition is deterministic: identical inputs always produce identical
//! output. No random or time-dependent logic is used.

pub mod compose;
pub mod format;
pub mod relevance;
pub mod token;

pub use compose::{ComposeStats, ComposedContext, ComposedSection, ContextComposer};
pub use format::SectionFormatter;
pub use relevance::{CategoryScore, RelevanceReport, RelevanceSelector};
pub use token::ComposerLimits;
