//! Interactive shell: prompts, key handling and layout.
//!
//! [`Ui`] holds the presentation state that is not part of the document
//! (open prompt, scroll position). Events go through [`Ui::handle_event`],
//! which edits the buffer or calls the matching [`App`] action; the event
//! loop then draws [`layout::render`] to the terminal.

pub mod frame;
pub mod keymap;
pub mod layout;

pub use frame::{Frame, Row, Span};
pub use keymap::{BINDINGS, Command, command_for};

use crate::app::App;
use crate::input::{Event, KeyCode, KeyEvent};
use crate::io;
use crate::transform;

/// What a prompt's answer will be used for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAs,
    RepeatCount,
    SubstituteFrom { apply: bool },
    SubstituteTo { from: String, apply: bool },
}

impl PromptKind {
    /// Label shown before the input.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open file: ",
            Self::SaveAs => "Save as: ",
            Self::RepeatCount => "Duplicate count: ",
            Self::SubstituteFrom { .. } => "Replace characters: ",
            Self::SubstituteTo { .. } => "With characters: ",
        }
    }
}

/// A one-line text prompt at the bottom of the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    fn new(kind: PromptKind, input: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
        }
    }

    /// Hint shown after the input.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match &self.kind {
            PromptKind::Open if io::is_text_file(std::path::Path::new(self.input.trim())) => {
                "  [text file]"
            }
            PromptKind::Open => "  (.txt .py .js .java .cpp .c .html .css .md, or any file)",
            _ => "",
        }
    }
}

/// Whether the event loop keeps running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Presentation state of the shell.
#[derive(Clone, Debug)]
pub struct Ui {
    prompt: Option<Prompt>,
    scroll_row: usize,
    scroll_col: usize,
    /// Text area height from the last layout; used as the page size.
    page_rows: usize,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            prompt: None,
            scroll_row: 0,
            scroll_col: 0,
            page_rows: 10,
        }
    }
}

impl Ui {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// First buffer line and display column shown in the text area.
    #[must_use]
    pub fn scroll(&self) -> (usize, usize) {
        (self.scroll_row, self.scroll_col)
    }

    /// Handle one input event.
    pub fn handle_event(&mut self, app: &mut App, event: &Event) -> Flow {
        match event {
            Event::Key(key) => {
                if self.prompt.is_some() {
                    self.handle_prompt_key(app, key)
                } else {
                    self.handle_editor_key(app, key)
                }
            }
            Event::Paste(text) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input.push_str(text.lines().next().unwrap_or_default());
                } else {
                    let text = transform::normalize_newlines(text);
                    let editor = app.editor_mut();
                    editor.commit();
                    editor.insert(&text);
                    editor.commit();
                }
                Flow::Continue
            }
            Event::Resize(..) => Flow::Continue,
        }
    }

    /// Run a bound command. Commands needing input open a prompt.
    pub fn run_command(&mut self, app: &mut App, command: Command) -> Flow {
        app.editor_mut().commit();
        match command {
            Command::Open => {
                let start = app
                    .current_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.prompt = Some(Prompt::new(PromptKind::Open, start));
            }
            Command::SetRepeatCount => {
                self.prompt = Some(Prompt::new(PromptKind::RepeatCount, app.repeat_input()));
            }
            Command::Substitute | Command::PreviewSubstitution => {
                let apply = command == Command::Substitute;
                let (from, _) = app.substitution();
                self.prompt = Some(Prompt::new(PromptKind::SubstituteFrom { apply }, from));
            }
            Command::Save => {
                let start = app.suggested_save_path().display().to_string();
                self.prompt = Some(Prompt::new(PromptKind::SaveAs, start));
            }
            Command::PreviewRepeat => {
                let _ = app.preview_repeat();
            }
            Command::Duplicate => {
                let _ = app.duplicate();
            }
            Command::Clear => app.clear(),
            Command::Undo => {
                app.editor_mut().undo();
            }
            Command::Redo => {
                app.editor_mut().redo();
            }
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn handle_editor_key(&mut self, app: &mut App, key: &KeyEvent) -> Flow {
        if let Some(command) = command_for(key) {
            return self.run_command(app, command);
        }

        if let Some(c) = key.typed_char() {
            app.editor_mut().insert(&c.to_string());
            return Flow::Continue;
        }

        if key.code == KeyCode::Esc {
            app.dismiss_notice();
            return Flow::Continue;
        }

        let page = self.page_rows.max(1);
        let editor = app.editor_mut();
        editor.commit();
        match key.code {
            KeyCode::Left => editor.move_left(),
            KeyCode::Right => editor.move_right(),
            KeyCode::Up => editor.move_up(),
            KeyCode::Down => editor.move_down(),
            KeyCode::Home => editor.move_to_line_start(),
            KeyCode::End => editor.move_to_line_end(),
            KeyCode::PageUp => editor.page_up(page),
            KeyCode::PageDown => editor.page_down(page),
            KeyCode::Enter => editor.insert("\n"),
            KeyCode::Tab => editor.insert("\t"),
            KeyCode::Backspace => editor.delete_backward(),
            KeyCode::Delete => editor.delete_forward(),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_prompt_key(&mut self, app: &mut App, key: &KeyEvent) -> Flow {
        if key.has_ctrl() && command_for(key) == Some(Command::Quit) {
            return Flow::Quit;
        }
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit(app, prompt);
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input.pop();
                }
            }
            _ => {
                if let (Some(prompt), Some(c)) = (&mut self.prompt, key.typed_char()) {
                    prompt.input.push(c);
                }
            }
        }
        Flow::Continue
    }

    fn submit(&mut self, app: &mut App, prompt: Prompt) {
        match prompt.kind {
            PromptKind::Open => {
                let path = prompt.input.trim();
                if !path.is_empty() && app.load(path).is_ok() {
                    self.scroll_row = 0;
                    self.scroll_col = 0;
                }
            }
            PromptKind::SaveAs => {
                let path = prompt.input.trim();
                if !path.is_empty() {
                    let _ = app.save(path);
                }
            }
            PromptKind::RepeatCount => app.set_repeat_input(&prompt.input),
            PromptKind::SubstituteFrom { apply } => {
                let (_, to) = app.substitution();
                let to = to.to_string();
                self.prompt = Some(Prompt::new(
                    PromptKind::SubstituteTo {
                        from: prompt.input,
                        apply,
                    },
                    to,
                ));
            }
            PromptKind::SubstituteTo { from, apply } => {
                app.set_substitution(&from, &prompt.input);
                let _ = if apply {
                    app.substitute()
                } else {
                    app.preview_substitution()
                };
            }
        }
    }

    /// Scroll so the cursor is inside a text area of the given size.
    pub fn scroll_to_cursor(&mut self, app: &App, area: &layout::TextArea) {
        let cursor = app.editor().cursor();
        let rows = area.height.max(1);
        self.page_rows = rows;
        if cursor.row < self.scroll_row {
            self.scroll_row = cursor.row;
        } else if cursor.row >= self.scroll_row + rows {
            self.scroll_row = cursor.row + 1 - rows;
        }

        let col = layout::cursor_display_col(app);
        let cols = area.text_width.max(1);
        if col < self.scroll_col {
            self.scroll_col = col;
        } else if col >= self.scroll_col + cols {
            self.scroll_col = col + 1 - cols;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    fn type_str(ui: &mut Ui, app: &mut App, s: &str) {
        for c in s.chars() {
            ui.handle_event(app, &KeyEvent::char(c).into());
        }
    }

    fn press(ui: &mut Ui, app: &mut App, code: KeyCode) -> Flow {
        ui.handle_event(app, &KeyEvent::key(code).into())
    }

    fn ctrl(ui: &mut Ui, app: &mut App, c: char) -> Flow {
        ui.handle_event(app, &KeyEvent::ctrl(c).into())
    }

    #[test]
    fn test_typing_edits_buffer() {
        let mut app = App::default();
        let mut ui = Ui::new();
        type_str(&mut ui, &mut app, "ab");
        press(&mut ui, &mut app, KeyCode::Enter);
        type_str(&mut ui, &mut app, "c");
        press(&mut ui, &mut app, KeyCode::Backspace);
        assert_eq!(app.text(), "ab\n");
    }

    #[test]
    fn test_count_prompt_then_duplicate() {
        let mut app = App::default();
        let mut ui = Ui::new();
        type_str(&mut ui, &mut app, "x");
        ctrl(&mut ui, &mut app, 'n');
        assert_eq!(ui.prompt().unwrap().input, "2");
        press(&mut ui, &mut app, KeyCode::Backspace);
        type_str(&mut ui, &mut app, "3");
        press(&mut ui, &mut app, KeyCode::Enter);
        assert!(ui.prompt().is_none());
        assert_eq!(app.repeat_input(), "3");

        ctrl(&mut ui, &mut app, 'd');
        assert_eq!(app.text(), "x\nx\nx");
    }

    #[test]
    fn test_substitution_prompts_chain() {
        let mut app = App::default();
        let mut ui = Ui::new();
        type_str(&mut ui, &mut app, "hello");
        ctrl(&mut ui, &mut app, 'r');
        type_str(&mut ui, &mut app, "l");
        press(&mut ui, &mut app, KeyCode::Enter);
        assert!(matches!(
            ui.prompt().unwrap().kind,
            PromptKind::SubstituteTo { apply: true, .. }
        ));
        type_str(&mut ui, &mut app, "L");
        press(&mut ui, &mut app, KeyCode::Enter);
        assert_eq!(app.text(), "heLLo");
        assert_eq!(app.substitution(), ("l", "L"));
    }

    #[test]
    fn test_substitution_preview_does_not_edit() {
        let mut app = App::default();
        let mut ui = Ui::new();
        type_str(&mut ui, &mut app, "abc");
        ctrl(&mut ui, &mut app, 't');
        type_str(&mut ui, &mut app, "a");
        press(&mut ui, &mut app, KeyCode::Enter);
        type_str(&mut ui, &mut app, "z");
        press(&mut ui, &mut app, KeyCode::Enter);
        assert_eq!(app.text(), "abc");
        let preview = app.preview().unwrap();
        assert_eq!(preview.lines[0].transformed.as_deref(), Some("zbc"));
    }

    #[test]
    fn test_escape_cancels_prompt() {
        let mut app = App::default();
        let mut ui = Ui::new();
        ctrl(&mut ui, &mut app, 'o');
        assert!(ui.prompt().is_some());
        press(&mut ui, &mut app, KeyCode::Esc);
        assert!(ui.prompt().is_none());
    }

    #[test]
    fn test_quit_from_editor_and_prompt() {
        let mut app = App::default();
        let mut ui = Ui::new();
        assert_eq!(ctrl(&mut ui, &mut app, 'q'), Flow::Quit);
        ctrl(&mut ui, &mut app, 's');
        assert_eq!(ctrl(&mut ui, &mut app, 'c'), Flow::Quit);
    }

    #[test]
    fn test_paste_inserts_as_one_undo_step() {
        let mut app = App::default();
        let mut ui = Ui::new();
        ui.handle_event(&mut app, &Event::Paste("one\ntwo".to_string()));
        assert_eq!(app.text(), "one\ntwo");
        ctrl(&mut ui, &mut app, 'z');
        assert_eq!(app.text(), "");
    }

    #[test]
    fn test_paste_into_prompt_takes_first_line() {
        let mut app = App::default();
        let mut ui = Ui::new();
        ctrl(&mut ui, &mut app, 'o');
        ui.handle_event(&mut app, &Event::Paste("/tmp/a.txt\nignored".to_string()));
        assert_eq!(ui.prompt().unwrap().input, "/tmp/a.txt");
        assert_eq!(ui.prompt().unwrap().hint(), "  [text file]");
    }

    #[test]
    fn test_alt_chord_is_ignored() {
        let mut app = App::default();
        let mut ui = Ui::new();
        ui.handle_event(
            &mut app,
            &KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT).into(),
        );
        assert_eq!(app.text(), "");
    }

    #[test]
    fn test_escape_dismisses_notice() {
        let mut app = App::default();
        let mut ui = Ui::new();
        ctrl(&mut ui, &mut app, 'd');
        assert!(app.notice().is_some());
        press(&mut ui, &mut app, KeyCode::Esc);
        assert!(app.notice().is_none());
    }
}
