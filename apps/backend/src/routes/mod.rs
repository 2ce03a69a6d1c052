pub mod document;
pub mod eligible;
pub mod sessions;
