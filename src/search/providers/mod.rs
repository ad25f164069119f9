pub mod wikipedia;

pub use wikipedia::{WikipediaProvider, LANG_PLACEHOLDER};
