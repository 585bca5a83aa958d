pub mod aggregator;
pub mod cleaner;
pub mod excel;
pub mod loader;
pub mod narrator;
pub mod visualizer;
pub mod writer;
