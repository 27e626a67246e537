//! Terminal rendering of comparison results

use clap::ValueEnum;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::models::EngineTranslation;

/// Shown instead of an empty side-by-side comparison
pub const NO_ENGINES_WARNING: &str = "No engines selected for comparison.";

const COLUMN_SEPARATOR: &str = " | ";
const MIN_COLUMN_WIDTH: usize = 10;

/// How comparison results are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
    /// One column per engine
    #[default]
    Horizontal,
    /// One block per engine, stacked
    Vertical,
}

/// Render `results` for a terminal `width` columns wide
pub fn render(results: &[EngineTranslation], layout: Layout, width: usize) -> String {
    match layout {
        Layout::Horizontal => render_horizontal(results, width),
        Layout::Vertical => render_vertical(results),
    }
}

fn render_vertical(results: &[EngineTranslation]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(&format!("== {} ==\n", result.engine));
        out.push_str(&result.translation);
        out.push_str("\n\n");
    }
    out
}

fn render_horizontal(results: &[EngineTranslation], width: usize) -> String {
    if results.is_empty() {
        return format!("{}\n", NO_ENGINES_WARNING);
    }

    let columns = results.len();
    let gaps = COLUMN_SEPARATOR.len() * (columns - 1);
    let column_width = (width.saturating_sub(gaps) / columns).max(MIN_COLUMN_WIDTH);

    let headers: Vec<String> = results
        .iter()
        .map(|r| truncate(&r.engine, column_width))
        .collect();
    let cells: Vec<Vec<String>> = results
        .iter()
        .map(|r| wrap(&r.translation, column_width))
        .collect();
    let height = cells.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = String::new();
    push_row(&mut out, headers.iter().map(String::as_str), column_width);
    out.push_str(&vec!["-".repeat(column_width); columns].join("-+-"));
    out.push('\n');
    for line in 0..height {
        let row = cells
            .iter()
            .map(|cell| cell.get(line).map(String::as_str).unwrap_or(""));
        push_row(&mut out, row, column_width);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, column_width: usize) {
    let row = cells
        .map(|cell| pad(cell, column_width))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    out.push_str(row.trim_end());
    out.push('\n');
}

fn pad(cell: &str, width: usize) -> String {
    format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width())))
}

fn truncate(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

/// Greedy word wrap by display width; wide (CJK) characters take two columns
/// and words wider than `width` are split between characters
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for source_line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in source_line.split(' ') {
            let word_width = word.width();

            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width > width {
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if current_width + ch_width > width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
                continue;
            }

            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(engine: &str, translation: &str) -> EngineTranslation {
        EngineTranslation {
            engine: engine.to_string(),
            translation: translation.to_string(),
        }
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("a\n\nb", 5), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("ab abcdefg", 4), vec!["ab", "abcd", "efg"]);
    }

    #[test]
    fn test_wrap_counts_wide_characters_twice() {
        assert_eq!(wrap("こんにちは世界", 6), vec!["こんに", "ちは世", "界"]);
        assert_eq!(wrap("こんにちは世界", 5), vec!["こん", "にち", "は世", "界"]);
        assert_eq!(wrap("日本 ok", 7), vec!["日本 ok"]);
    }

    #[test]
    fn test_vertical_layout() {
        let out = render(
            &[result("OpenAI/GPT-4o", "こんにちは"), result("Ollama/gemma", "やあ")],
            Layout::Vertical,
            80,
        );
        assert_eq!(out, "== OpenAI/GPT-4o ==\nこんにちは\n\n== Ollama/gemma ==\nやあ\n\n");
    }

    #[test]
    fn test_horizontal_layout() {
        let out = render(
            &[result("A", "hello world"), result("B", "bonjour le monde")],
            Layout::Horizontal,
            30,
        );
        let lines: Vec<&str> = out.lines().collect();

        // (30 - 3) / 2 = 13 characters per column
        assert_eq!(lines[0], format!("{:<13} | B", "A"));
        assert_eq!(lines[1], format!("{}-+-{}", "-".repeat(13), "-".repeat(13)));
        assert_eq!(lines[2], format!("{:<13} | bonjour le", "hello world"));
        assert_eq!(lines[3], format!("{:<13} | monde", ""));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_horizontal_layout_pads_wide_characters() {
        let out = render(
            &[result("Ollama/日本語", "こんにちは 世界"), result("B", "hi")],
            Layout::Horizontal,
            23,
        );
        let lines: Vec<&str> = out.lines().collect();

        // (23 - 3) / 2 = 10 columns; each kana or kanji fills two
        assert_eq!(lines[0], "Ollama/日  | B");
        assert_eq!(lines[2], "こんにちは | hi");
        assert_eq!(lines[3], "世界");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_horizontal_layout_without_engines() {
        assert_eq!(
            render(&[], Layout::Horizontal, 80),
            "No engines selected for comparison.\n"
        );
        assert_eq!(render(&[], Layout::Vertical, 80), "");
    }
}
