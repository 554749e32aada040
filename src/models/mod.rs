pub mod client_meta;
pub mod feeling;
pub mod story;

pub use client_meta::ClientMeta;
pub use feeling::Feeling;
pub use story::{NewStory, Source, Story};
