pub mod metadata;

pub use metadata::{CardMeta, CardMetaEntry, CardMetadataStore};
