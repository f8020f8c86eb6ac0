//! Charts module - bar charts and the title word cloud

pub mod plotter;
pub mod wordcloud;

pub use plotter::ChartPlotter;
pub use wordcloud::{word_frequencies, WordCloud};
