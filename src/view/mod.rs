//! View module - Text screens built from the engine's query surface
//!
//! Provides:
//! - layout: result rows and scroll extents
//! - syntax: NASTRAN syntax colouring and search highlighting
//! - Screen: the full search screen
//! - includes: the include list screen

pub mod layout;
pub mod syntax;

use colored::Colorize;

use crate::core::paths::normalize_path;
use crate::engine::Engine;
use layout::{Page, Row, NO_RESULTS};

pub const TITLE: &str = "nasfind";
pub const SUBTITLE: &str = " - search in NASTRAN include trees";

const SEPARATOR_WIDTH: usize = 60;

/// Text rendering of the engine's last search
pub struct Screen<'a> {
    engine: &'a Engine,
    page: Page,
    color: bool,
}

impl<'a> Screen<'a> {
    pub fn new(engine: &'a Engine) -> Self {
        Self {
            engine,
            page: Page::default(),
            color: false,
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render title, search box, result page and error box
    pub fn render(&self) -> String {
        let engine = self.engine;
        let mut out = String::new();

        push_title(&mut out, engine, self.color);

        let search = engine.search_text();
        let search_box = if search.is_empty() {
            "---search field empty---".to_string()
        } else {
            self.paint(search, |s| s.reversed().to_string())
        };
        out.push_str(&format!("Search: <{}>   (case insensitive)\n", search_box));

        let rows = layout::rows(engine);
        let maximum = layout::maximum_scroll(engine);
        out.push_str(&format!(
            "Results: {} occurrences in {} files. (scroll {}/{})\n",
            engine.occurrence_count_all(),
            engine.link_count(),
            self.page.clamped_scroll(maximum),
            maximum
        ));
        out.push_str(&"-".repeat(SEPARATOR_WIDTH));
        out.push('\n');

        for row in self.page.window(&rows) {
            match row {
                Row::FileHeader(path) => {
                    let header = format!("--- {} ---", path);
                    out.push_str(&self.paint(&header, |s| s.bold().to_string()));
                }
                Row::Occurrence { text, label_len } => {
                    out.push_str(&syntax::colorize_line(text, *label_len, search, self.color));
                }
                Row::NoResults => out.push_str(&self.paint(NO_RESULTS, |s| s.dimmed().to_string())),
                Row::Blank => {}
            }
            out.push('\n');
        }

        push_errors(&mut out, engine, self.color);
        out
    }

    fn paint(&self, s: &str, style: impl Fn(&str) -> String) -> String {
        if self.color {
            style(s)
        } else {
            s.to_string()
        }
    }
}

/// Numbered list of the visited files, followed by the error box
pub fn includes(engine: &Engine, color: bool) -> String {
    let mut out = String::new();
    push_title(&mut out, engine, color);

    let width = engine.link_count().to_string().len();
    for (index, file) in engine.files().iter().enumerate() {
        out.push_str(&format!(
            "{:>width$}. {}\n",
            index + 1,
            normalize_path(file),
            width = width
        ));
    }

    push_errors(&mut out, engine, color);
    out
}

fn push_title(out: &mut String, engine: &Engine, color: bool) {
    if color {
        out.push_str(&TITLE.bold().to_string());
    } else {
        out.push_str(TITLE);
    }
    out.push_str(SUBTITLE);
    out.push('\n');
    out.push_str(&format!(
        "File: {}   (total {} included)\n",
        normalize_path(engine.root()),
        engine.link_count()
    ));
}

fn push_errors(out: &mut String, engine: &Engine, color: bool) {
    for index in 0..engine.error_count() {
        let Some(message) = engine.error_at(index) else {
            continue;
        };
        let line = format!("/!\\:{}", message);
        if color {
            out.push_str(&line.white().on_red().to_string());
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
}
