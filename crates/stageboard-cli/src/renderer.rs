//! Terminal rendering for markdown output
//!
//! Board titles and column headings keep their hash marks and get a color
//! per level; everything else goes through termimad's inline renderer.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const BOARD_HEADING: &str = "\x1b[1;34m";
const COLUMN_HEADING: &str = "\x1b[36m";
const ITEM_HEADING: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match heading_color(line) {
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
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

fn heading_color(line: &str) -> Option<&'static str> {
    if line.starts_with("### ") {
        Some(ITEM_HEADING)
    } else if line.starts_with("## ") {
        Some(COLUMN_HEADING)
    } else if line.starts_with("# ") {
        Some(BOARD_HEADING)
    } else {
        None
    }
}
