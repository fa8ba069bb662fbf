//! Text normalization shared by matching, highlighting and sorting

mod normalizer;

pub use normalizer::{NormalizeMode, collation_key, normalize, normalize_with};
pub(crate) use normalizer::{fold_char, push_key_char, trim_key_end};
