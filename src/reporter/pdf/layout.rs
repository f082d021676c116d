//! Page layout for the investor report
//!
//! Positions are in PDF points with the origin at the bottom-left corner.
//! Text flows top-down from `TOP`; before any line is placed below
//! `BOTTOM` a new page is started.

use crate::reporter::i18n::{narrative, Language, SECTION_HEADINGS};
use crate::reporter::highlights;
use crate::AnalysisResult;

/// A4 width in points
pub const PAGE_WIDTH: f64 = 595.28;
/// A4 height in points
pub const PAGE_HEIGHT: f64 = 841.89;
pub const MARGIN_X: f64 = 50.0;
pub const TOP: f64 = PAGE_HEIGHT - 50.0;
pub const BOTTOM: f64 = 80.0;

pub const TITLE_SIZE: f64 = 20.0;
pub const HEADING_SIZE: f64 = 14.0;
pub const BODY_SIZE: f64 = 11.0;

/// Paragraph wrap width in characters
pub const WRAP_CHARS: usize = 90;
pub const LINE_HEIGHT: f64 = 14.0;
pub const ITEM_HEIGHT: f64 = 16.0;
pub const LIST_INDENT: f64 = 10.0;

const TITLE_GAP: f64 = 40.0;
const HEADING_GAP: f64 = 20.0;
const SECTION_GAP: f64 = 15.0;
const HIGHLIGHTS_GAP: f64 = 20.0;

/// Standard Type1 fonts used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// One line of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub font: Font,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

/// Greedy word wrap.
///
/// Whitespace runs collapse to single spaces. Words longer than `width`
/// fill the rest of the current line and are then broken into
/// `width`-sized pieces.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let sep = usize::from(current_len > 0);

        if current_len + sep + word_len <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_len += sep + word_len;
            continue;
        }

        if word_len <= width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        let chars: Vec<char> = word.chars().collect();
        let mut rest = &chars[..];
        if current_len > 0 {
            let space_left = width.saturating_sub(current_len + 1);
            if space_left > 0 {
                current.push(' ');
                current.extend(&rest[..space_left]);
                rest = &rest[space_left..];
            }
            lines.push(std::mem::take(&mut current));
        }
        while rest.len() > width {
            lines.push(rest[..width].iter().collect());
            rest = &rest[width..];
        }
        current = rest.iter().collect();
        current_len = rest.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Top-down cursor over a growing list of pages
#[derive(Debug)]
pub struct PageLayout {
    pages: Vec<Page>,
    y: f64,
}

impl PageLayout {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: TOP,
        }
    }

    /// Current baseline
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Place one line at the cursor, then move down by `advance`
    pub fn line(&mut self, font: Font, size: f64, indent: f64, text: &str, advance: f64) {
        if self.y < BOTTOM {
            self.pages.push(Page::default());
            self.y = TOP;
        }
        let run = TextRun {
            font,
            size,
            x: MARGIN_X + indent,
            y: self.y,
            text: text.to_string(),
        };
        if let Some(page) = self.pages.last_mut() {
            page.runs.push(run);
        }
        self.y -= advance;
    }

    /// Wrapped body paragraph
    pub fn paragraph(&mut self, text: &str) {
        for line in wrap_text(text, WRAP_CHARS) {
            self.line(Font::Helvetica, BODY_SIZE, 0.0, &line, LINE_HEIGHT);
        }
    }

    pub fn heading(&mut self, text: &str) {
        self.line(Font::HelveticaBold, HEADING_SIZE, 0.0, text, HEADING_GAP);
    }

    /// Bulleted list item
    pub fn item(&mut self, text: &str) {
        self.line(Font::Helvetica, BODY_SIZE, LIST_INDENT, &format!("- {}", text), ITEM_HEIGHT);
    }

    /// Extra vertical gap
    pub fn skip(&mut self, gap: f64) {
        self.y -= gap;
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out the five-section investor report
pub fn layout_report(result: &AnalysisResult, language: Language) -> Vec<Page> {
    let text = narrative(language, &result.industry);
    let mut layout = PageLayout::new();

    layout.line(Font::HelveticaBold, TITLE_SIZE, 0.0, &text.title, TITLE_GAP);

    layout.heading(SECTION_HEADINGS[0]);
    layout.paragraph(&text.executive_summary);
    layout.skip(SECTION_GAP);

    layout.heading(SECTION_HEADINGS[1]);
    for (label, value) in highlights(result) {
        layout.line(
            Font::Helvetica,
            BODY_SIZE,
            0.0,
            &format!("{}: {}", label, value),
            ITEM_HEIGHT,
        );
    }
    layout.skip(HIGHLIGHTS_GAP);

    layout.heading(SECTION_HEADINGS[2]);
    for risk in &result.risks {
        layout.item(risk);
    }
    layout.skip(SECTION_GAP);

    layout.heading(SECTION_HEADINGS[3]);
    for rec in &result.recommendations {
        layout.item(rec);
    }
    layout.skip(SECTION_GAP);

    layout.heading(SECTION_HEADINGS[4]);
    layout.paragraph(&text.investment_outlook);

    layout.finish()
}
