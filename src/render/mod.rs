pub mod format;
pub mod svg;

pub use svg::{render_languages_card, render_stats_card, top_languages};
