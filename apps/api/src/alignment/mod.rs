pub mod glyphs;
pub mod handlers;
pub mod heatmap;
pub mod prompts;
pub mod requirements;
pub mod scoring;
