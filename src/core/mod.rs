pub mod feed;
pub mod submit;
