// Label wrapping for node boxes.
//
// The wrap algorithm is measurement-driven: words accumulate onto a line
// until the rendered width would exceed the budget. Measurement itself is
// injected, so the core carries no rendering backend; the wasm boundary
// plugs in a canvas-backed measurer and headless use falls back to the
// character-class heuristic below.

/// Measures rendered text width in pixels.
pub trait TextMeasure {
    fn width(&self, text: &str) -> f32;
}

/// Width estimate without a rendering backend: Latin glyphs average a bit
/// over half an em at the label weight, CJK glyphs a full em.
#[derive(Debug, Clone)]
pub struct HeuristicMeasure {
    pub font_size: f32,
}

impl Default for HeuristicMeasure {
    fn default() -> Self {
        Self { font_size: 12.0 }
    }
}

impl TextMeasure for HeuristicMeasure {
    fn width(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| {
                if c == ' ' {
                    0.32 * self.font_size
                } else if c.is_ascii() {
                    0.62 * self.font_size
                } else {
                    1.0 * self.font_size
                }
            })
            .sum()
    }
}

/// Greedily wrap `text` into lines no wider than `max_width`. A word wider
/// than the whole budget gets a line of its own; no empty lines are emitted.
pub fn wrap_label(text: &str, max_width: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure.width(&candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Vertical offset that recenters a wrapped block on the node center: the
/// first line renders on the baseline, every extra line drops the block by
/// one line height, so shift up by half of the extra height.
pub fn block_offset(line_count: usize, line_height_em: f32, font_size: f32) -> f32 {
    if line_count < 2 {
        return 0.0;
    }
    -((line_count - 1) as f32 * line_height_em * font_size / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    /// Fixed-width measurer so tests can reason in character counts.
    struct Monospace;

    impl TextMeasure for Monospace {
        fn width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        let lines = wrap_label("stay fit", 200.0, &Monospace);
        assert_eq!(lines, ["stay fit"]);
    }

    #[test]
    fn test_wraps_at_width_budget() {
        // 10 px per char, 100 px budget: at most 10 chars per line.
        let lines = wrap_label("alpha beta gamma delta", 100.0, &Monospace);
        assert_eq!(lines, ["alpha beta", "gamma", "delta"]);
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let lines = wrap_label("a incomprehensibilities b", 100.0, &Monospace);
        assert_eq!(lines, ["a", "incomprehensibilities", "b"]);
        assert!(lines.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn test_empty_and_whitespace_text() {
        assert!(wrap_label("", 200.0, &Monospace).is_empty());
        assert!(wrap_label("   ", 200.0, &Monospace).is_empty());
    }

    #[test]
    fn test_block_offset_recenters_by_extra_lines() {
        assert_eq!(block_offset(0, 1.2, 12.0), 0.0);
        assert_eq!(block_offset(1, 1.2, 12.0), 0.0);
        // Two lines: half of one extra 14.4 px line height.
        assert!(approx_eq!(f32, block_offset(2, 1.2, 12.0), -7.2, ulps = 2));
        assert!(approx_eq!(f32, block_offset(4, 1.2, 12.0), -21.6, ulps = 2));
    }

    #[test]
    fn test_heuristic_counts_wide_glyphs_wider() {
        let m = HeuristicMeasure::default();
        assert!(m.width("목표를 이룬다") > m.width("reach it"));
    }
}
