pub mod scoring;
pub mod swipe;
