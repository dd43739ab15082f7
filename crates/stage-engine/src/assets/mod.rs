pub mod atlas;
pub mod manifest;
pub mod store;
