//! Terminal rendering module for rich markdown output
//!
//! This module provides terminal rendering capabilities using termimad
//! for rich markdown display with optional fallback to plain text.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

/// Splits markdown into header lines and the text blocks between them.
fn blocks(markdown: &str) -> Vec<(bool, String)> {
    let mut blocks: Vec<(bool, String)> = Vec::new();
    for line in markdown.lines() {
        let is_header = line.starts_with('#');
        match blocks.last_mut() {
            Some((false, text)) if !is_header => {
                text.push_str(line);
                text.push('\n');
            }
            _ => blocks.push((is_header, format!("{line}\n"))),
        }
    }
    blocks
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        // Headers keep their hash marks; tables and bullets go through termimad
        for (is_header, text) in blocks(markdown) {
            if is_header {
                print!("\x1b[34m{text}\x1b[0m");
            } else {
                self.skin.print_text(&text);
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_blocks_separate_headers_from_tables() {
        let markdown = "# Trucks\n\n| ID | Plate |\n|---:|---|\n| 1 | BRA2E19 |\n";
        let blocks = blocks(markdown);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], (true, "# Trucks\n".to_string()));
        assert!(!blocks[1].0);
        assert!(blocks[1].1.contains("| 1 | BRA2E19 |"));
    }

    #[test]
    fn test_blocks_of_consecutive_headers() {
        let blocks = blocks("# Trip 1\n## Tolls\nNo tolls found.\n");
        let kinds: Vec<bool> = blocks.iter().map(|(header, _)| *header).collect();
        assert_eq!(kinds, vec![true, true, false]);
    }
}
