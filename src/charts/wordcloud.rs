//! Title Word Cloud
//! Frequency counting over paper titles and a spiral-layout renderer painted
//! directly onto a fixed white canvas.

use std::collections::HashMap;

use egui::{vec2, Color32, FontId, Pos2, Rect, Sense, Ui, Vec2};

use crate::charts::plotter::PALETTE;
use crate::data::model::PaperSet;

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 400.0;

const MIN_FONT_SIZE: f32 = 14.0;
const MAX_FONT_SIZE: f32 = 52.0;
const MAX_PLACEMENT_STEPS: usize = 600;

/// Common English words excluded from the cloud.
const STOPWORDS: [&str; 52] = [
    "the", "and", "for", "with", "from", "that", "this", "are", "was", "were",
    "has", "have", "had", "not", "but", "its", "can", "may", "will", "all",
    "our", "their", "these", "those", "than", "then", "them", "they", "there",
    "been", "being", "into", "onto", "over", "under", "between", "among",
    "during", "after", "before", "about", "against", "through", "using",
    "use", "used", "based", "upon", "via", "per", "within", "without",
];

/// Word frequencies across all non-null titles in the filtered view:
/// lowercased, edge punctuation stripped, stopwords and short tokens
/// dropped, ordered by count descending (word ascending on ties).
pub fn word_frequencies(
    papers: &PaperSet,
    indices: &[usize],
    max_words: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for &i in indices {
        let Some(title) = papers.records[i].title.as_deref() else {
            continue;
        };
        for token in title.split_whitespace() {
            let word: String = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if word.chars().count() < 3 || STOPWORDS.contains(&word.as_str()) {
                continue;
            }
            *counts.entry(word).or_default() += 1;
        }
    }

    let mut words: Vec<(String, usize)> = counts.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(max_words);
    words
}

/// Font size for a word, scaling with the square root of its relative
/// frequency so mid-frequency words stay legible.
fn font_size(count: usize, max_count: usize) -> f32 {
    if max_count == 0 {
        return MIN_FONT_SIZE;
    }
    let ratio = (count as f32 / max_count as f32).sqrt();
    MIN_FONT_SIZE + (MAX_FONT_SIZE - MIN_FONT_SIZE) * ratio
}

/// Walk an elliptical spiral out from the canvas center until the word's
/// bounding box fits without overlapping anything already placed.
fn place(canvas: Rect, dims: Vec2, placed: &[Rect]) -> Option<Pos2> {
    let center = canvas.center();
    for step in 0..MAX_PLACEMENT_STEPS {
        let t = step as f32;
        let angle = 0.4 * t;
        let radius = 1.4 * angle;
        // Wider than tall, matching the canvas aspect.
        let offset = vec2(1.8 * radius * angle.cos(), 0.9 * radius * angle.sin());
        let candidate = Rect::from_center_size(center + offset, dims);
        if canvas.contains_rect(candidate) && !placed.iter().any(|p| p.intersects(candidate)) {
            return Some(candidate.min);
        }
    }
    None
}

/// Paints the word cloud on a fixed 800x400 white canvas with no axis
/// decoration. An empty frequency list renders the blank canvas.
pub struct WordCloud;

impl WordCloud {
    pub fn show(ui: &mut Ui, words: &[(String, usize)]) {
        let (rect, _) = ui.allocate_exact_size(
            vec2(CANVAS_WIDTH, CANVAS_HEIGHT),
            Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, Color32::WHITE);

        let Some(&(_, max_count)) = words.first() else {
            return;
        };

        let mut placed: Vec<Rect> = Vec::new();
        for (idx, (word, count)) in words.iter().enumerate() {
            let size = font_size(*count, max_count);
            let color = PALETTE[idx % PALETTE.len()];
            let galley = painter.layout_no_wrap(word.clone(), FontId::proportional(size), color);
            let dims = galley.size();
            if let Some(pos) = place(rect, dims, &placed) {
                let target = Rect::from_min_size(pos, dims);
                painter.galley(target.min, galley, color);
                placed.push(target.expand(2.0));
            }
            // Words that cannot fit are dropped, as in any packed cloud.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PaperRecord;

    fn title_set(titles: &[Option<&str>]) -> PaperSet {
        PaperSet {
            records: titles
                .iter()
                .map(|t| PaperRecord::new(t.map(str::to_string), None, None, None, None))
                .collect(),
            fingerprint: 0,
        }
    }

    #[test]
    fn counts_normalized_tokens_across_titles() {
        let papers = title_set(&[
            Some("Viral transmission dynamics"),
            Some("viral load and transmission."),
            None,
        ]);
        let indices: Vec<usize> = (0..papers.len()).collect();
        let words = word_frequencies(&papers, &indices, 10);

        assert_eq!(words[0], ("transmission".to_string(), 2));
        assert!(words.contains(&("viral".to_string(), 2)));
        assert!(words.contains(&("load".to_string(), 1)));
        // "and" is a stopword.
        assert!(!words.iter().any(|(w, _)| w == "and"));
    }

    #[test]
    fn short_tokens_and_punctuation_are_stripped() {
        let papers = title_set(&[Some("Of a \"pandemic,\" (2020): an overview")]);
        let indices = vec![0];
        let words = word_frequencies(&papers, &indices, 10);
        assert!(words.contains(&("pandemic".to_string(), 1)));
        assert!(words.contains(&("2020".to_string(), 1)));
        assert!(!words.iter().any(|(w, _)| w == "of" || w == "a" || w == "an"));
    }

    #[test]
    fn empty_or_null_titles_yield_empty_cloud_input() {
        let papers = title_set(&[None, Some("   ")]);
        let indices: Vec<usize> = (0..papers.len()).collect();
        assert!(word_frequencies(&papers, &indices, 10).is_empty());
        assert!(word_frequencies(&papers, &[], 10).is_empty());
    }

    #[test]
    fn truncates_to_requested_word_budget() {
        let papers = title_set(&[Some("alpha beta gamma delta epsilon zeta")]);
        let words = word_frequencies(&papers, &[0], 3);
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn font_size_scales_within_bounds() {
        assert_eq!(font_size(10, 10), MAX_FONT_SIZE);
        assert!(font_size(1, 10) >= MIN_FONT_SIZE);
        assert!(font_size(1, 10) < font_size(5, 10));
        assert_eq!(font_size(0, 0), MIN_FONT_SIZE);
    }
}
