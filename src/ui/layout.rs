//! Screen layout: where each part of the window goes and how it looks.
//!
//! From top to bottom: toolbar, file and field row, text area with a line
//! number gutter, preview panel, prompt or notice line, status bar.

use crate::app::App;
use crate::error::Severity;
use crate::style::{Color, Style};
use crate::ui::frame::{Frame, Span};
use crate::ui::keymap::BINDINGS;
use crate::ui::Ui;
use crate::unicode::{display_width, expand_tabs, skip_columns};

/// Rows that are always present: toolbar, field row, prompt line, status bar.
const CHROME_ROWS: usize = 4;

/// First row of the text area.
const TEXT_TOP: usize = 2;

/// Right-hand help text on the status bar.
pub const HELP_TEXT: &str = "Format: the whole text is duplicated the given number of times";

const TOOLBAR: Style = Style::PLAIN.with_inverse();
const STATUS: Style = Style::PLAIN.with_inverse();
const LABEL: Style = Style::PLAIN.with_bold();
const GUTTER: Style = Style::fg(Color::BrightBlack);
const PREVIEW_HEADER: Style = Style::fg(Color::Cyan).with_bold();
const HINT: Style = Style::PLAIN.with_dim();

/// Geometry of the text area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextArea {
    /// Screen row of the first text line.
    pub top: usize,
    /// Visible text lines.
    pub height: usize,
    /// Columns taken by line numbers and their separator.
    pub gutter: usize,
    /// Columns left for text.
    pub text_width: usize,
}

/// Rows the preview panel wants: the preview text, or one placeholder row.
#[must_use]
pub fn preview_rows(app: &App) -> usize {
    app.preview().map_or(1, |p| p.lines.len() + 3)
}

/// Text area geometry for a `width` x `height` screen.
///
/// The preview panel gives up rows before the text area drops below one line.
#[must_use]
pub fn text_area(app: &App, width: usize, height: usize) -> TextArea {
    let lines = app.editor().buffer().len_lines();
    let gutter = lines.to_string().len().max(3) + 1;
    let available = height.saturating_sub(CHROME_ROWS);
    let preview = preview_rows(app).min(available.saturating_sub(1));
    TextArea {
        top: TEXT_TOP,
        height: available - preview,
        gutter,
        text_width: width.saturating_sub(gutter),
    }
}

/// Display column of the cursor within its line, with tabs expanded.
#[must_use]
pub fn cursor_display_col(app: &App) -> usize {
    let editor = app.editor();
    let cursor = editor.cursor();
    let line = editor.buffer().line(cursor.row).unwrap_or_default();
    let prefix: String = line.chars().take(cursor.col).collect();
    display_width(&expand_tabs(&prefix))
}

/// Lay out the whole window, scrolling `ui` to keep the cursor visible.
pub fn render(app: &App, ui: &mut Ui, width: usize, height: usize) -> Frame {
    let mut frame = Frame::new(width, height);
    let area = text_area(app, width, height);
    ui.scroll_to_cursor(app, &area);

    frame.set_row(0, toolbar(), TOOLBAR);
    frame.set_row(1, field_row(app), Style::PLAIN);
    draw_text(&mut frame, app, ui, &area);
    draw_preview(&mut frame, app, area.top + area.height, height);

    let prompt_row = height.saturating_sub(2);
    let status_row = height.saturating_sub(1);
    if let Some(prompt) = ui.prompt() {
        let label = prompt.kind.label();
        frame.set_row(
            prompt_row,
            vec![
                Span::new(label, LABEL),
                Span::plain(prompt.input.clone()),
                Span::new(prompt.hint(), HINT),
            ],
            Style::PLAIN,
        );
        frame.set_cursor(Some((
            prompt_row,
            display_width(label) + display_width(&prompt.input),
        )));
    } else {
        if let Some(notice) = app.notice() {
            let style = notice_style(notice.severity);
            frame.set_row(
                prompt_row,
                vec![
                    Span::new(format!("[{}] ", severity_label(notice.severity)), style),
                    Span::new(format!("{}: ", notice.title), style),
                    Span::plain(notice.message.clone()),
                    Span::new("  (Esc to dismiss)", HINT),
                ],
                Style::PLAIN,
            );
        }
        let (scroll_row, scroll_col) = ui.scroll();
        let cursor = app.editor().cursor();
        let col = cursor_display_col(app);
        let visible = cursor.row >= scroll_row
            && cursor.row - scroll_row < area.height
            && col >= scroll_col;
        if visible {
            frame.set_cursor(Some((
                area.top + cursor.row - scroll_row,
                area.gutter + col - scroll_col,
            )));
        }
    }

    frame.set_row(status_row, status_bar(app.status(), width), STATUS);
    frame
}

fn toolbar() -> Vec<Span> {
    BINDINGS
        .iter()
        .map(|(key, _, label)| {
            Span::new(
                format!(" ^{} {label} ", key.to_ascii_uppercase()),
                TOOLBAR,
            )
        })
        .collect()
}

fn field_row(app: &App) -> Vec<Span> {
    let (from, to) = app.substitution();
    vec![
        Span::new(app.file_label(), LABEL),
        Span::plain(format!("   Count: [{}]", app.repeat_input())),
        Span::plain(format!("   Replace: [{from}] -> [{to}]")),
    ]
}

fn draw_text(frame: &mut Frame, app: &App, ui: &Ui, area: &TextArea) {
    let buffer = app.editor().buffer();
    let (scroll_row, scroll_col) = ui.scroll();
    for i in 0..area.height {
        let idx = scroll_row + i;
        let Some(line) = buffer.line(idx) else {
            frame.set_row(area.top + i, Vec::new(), Style::PLAIN);
            continue;
        };
        let expanded = expand_tabs(&line);
        frame.set_row(
            area.top + i,
            vec![
                Span::new(format!("{:>w$} ", idx + 1, w = area.gutter - 1), GUTTER),
                Span::plain(skip_columns(&expanded, scroll_col)),
            ],
            Style::PLAIN,
        );
    }
}

fn draw_preview(frame: &mut Frame, app: &App, top: usize, height: usize) {
    let last = height.saturating_sub(2);
    match app.preview() {
        Some(preview) => {
            let text = preview.to_string();
            for (i, line) in text.lines().enumerate() {
                let y = top + i;
                if y >= last {
                    break;
                }
                let style = if i == 0 { PREVIEW_HEADER } else { Style::PLAIN };
                frame.set_row(y, vec![Span::new(line, style)], Style::PLAIN);
            }
        }
        None if top < last => frame.set_row(
            top,
            vec![Span::new(
                "Preview: ^P duplicate, ^T replace",
                HINT,
            )],
            Style::PLAIN,
        ),
        None => {}
    }
}

fn status_bar(status: &str, width: usize) -> Vec<Span> {
    let used = display_width(status) + 1;
    let help = display_width(HELP_TEXT) + 1;
    let mut spans = vec![Span::new(format!(" {status}"), STATUS)];
    if used + help + 2 <= width {
        spans.push(Span::new(
            format!("{}{HELP_TEXT} ", " ".repeat(width - used - help)),
            STATUS.with_dim(),
        ));
    }
    spans
}

fn notice_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::fg(Color::Green).with_bold(),
        Severity::Warning => Style::fg(Color::Yellow).with_bold(),
        Severity::Error => Style::fg(Color::Red).with_bold(),
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "Info",
        Severity::Warning => "Warning",
        Severity::Error => "Error",
    }
}
