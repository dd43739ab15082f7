pub mod area;
pub mod context;
pub mod node;
pub mod scene;
pub mod stack;
pub mod time;
pub mod tree;
