//! Static prompt corpus and selection
//!
//! Selection is pure over (domains, used ids, optional type filter); the
//! daily prompt is a deterministic date-keyed pick shared by every
//! installation with the same domain configuration.

mod corpus;
mod daily;

pub use corpus::Corpus;
