//! Source parsers, one per input format. Each converts raw file bodies into
//! normalized `LexicalRecord`s; nothing above this layer re-parses raw text.
//!
//! The merge engine consumes sources in a fixed, documented order so that
//! precedence stays deterministic even when retrieval runs concurrently:
//!   1. gloss dictionary (base, gloss-bearing)
//!   2. structured vocabulary (enrichment-designated)
//!   3. leveled tables
//!   4. frequency lists (in configured order)
//!   5. built-in seeds (lowest precedence, fills gaps only)

pub mod frequency;
pub mod gloss_dict;
pub mod level_table;
pub mod structured;
