pub mod caption;
pub mod input;
pub mod interaction;
pub mod placement;
pub mod tracker;
pub mod visualizer;
