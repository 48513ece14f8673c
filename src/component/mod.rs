//! 功能元件模組

pub mod highlight_reel;

pub use highlight_reel::HighlightReel;
