//! Application state and user actions.
//!
//! [`App`] owns everything the window shows: the editable buffer, the path
//! of the loaded file, the text typed into the count and substitution fields,
//! the last preview, the status line and the current notice. Each action
//! runs one transform synchronously and either replaces the buffer or leaves
//! it untouched and records a notice.

use crate::config::Options;
use crate::error::{Error, Result, Severity};
use crate::event::{LogLevel, emit_log};
use crate::io;
use crate::text::EditBuffer;
use crate::transform::{self, PendingTransform, Preview, RepeatCount, SubstitutionMap};
use std::path::{Path, PathBuf};

/// A message for the user, shown until dismissed or replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        Self {
            severity: err.severity(),
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

/// The whole state of the running application.
#[derive(Debug)]
pub struct App {
    options: Options,
    editor: EditBuffer,
    current_path: Option<PathBuf>,
    repeat_input: String,
    substitution_from: String,
    substitution_to: String,
    preview: Option<Preview>,
    status: String,
    notice: Option<Notice>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl App {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            editor: EditBuffer::new(),
            current_path: None,
            repeat_input: options.default_repeat_count.to_string(),
            substitution_from: String::new(),
            substitution_to: String::new(),
            preview: None,
            status: lines_status(0),
            notice: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn editor(&self) -> &EditBuffer {
        &self.editor
    }

    /// Direct access for typing into the text area.
    pub fn editor_mut(&mut self) -> &mut EditBuffer {
        &mut self.editor
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.editor.text()
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// `File: <name>` or `File: none`.
    #[must_use]
    pub fn file_label(&self) -> String {
        match &self.current_path {
            Some(path) => format!("File: {}", io::display_name(path)),
            None => "File: none".to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn repeat_input(&self) -> &str {
        &self.repeat_input
    }

    pub fn set_repeat_input(&mut self, input: &str) {
        self.repeat_input = input.to_string();
    }

    #[must_use]
    pub fn substitution(&self) -> (&str, &str) {
        (&self.substitution_from, &self.substitution_to)
    }

    pub fn set_substitution(&mut self, from: &str, to: &str) {
        self.substitution_from = from.to_string();
        self.substitution_to = to.to_string();
    }

    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Where Save suggests writing.
    #[must_use]
    pub fn suggested_save_path(&self) -> PathBuf {
        io::suggested_save_path(self.current_path.as_deref())
    }

    /// Replace the buffer with a file's content, line breaks normalized to `\n`.
    ///
    /// On failure the buffer, path and status are left as they were.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let result = io::load(path).map(|raw| {
            let text = transform::normalize_newlines(&raw);
            self.editor.set_text(&text);
            self.current_path = Some(path.to_path_buf());
            self.preview = None;
            self.notice = None;
            self.status = lines_status(transform::line_count(&text));
            emit_log(LogLevel::Info, &format!("opened {}", path.display()));
        });
        self.record(result)
    }

    /// Repeat the buffer by the count in the count field.
    pub fn duplicate(&mut self) -> Result<()> {
        let result = self.try_duplicate();
        self.record(result)
    }

    fn try_duplicate(&mut self) -> Result<()> {
        let count = RepeatCount::parse(&self.repeat_input)?;
        let repeated = transform::repeat(&self.editor.text(), count)?;
        self.editor.replace_text(&repeated);
        self.status = format!(
            "{} (duplicated {count} times)",
            lines_status(transform::line_count(&repeated))
        );
        emit_log(LogLevel::Info, &format!("duplicated text {count} times"));
        Ok(())
    }

    /// Apply the substitution typed into the from/to fields.
    pub fn substitute(&mut self) -> Result<()> {
        let result = self.try_substitute();
        self.record(result)
    }

    fn try_substitute(&mut self) -> Result<()> {
        let map = SubstitutionMap::new(&self.substitution_from, &self.substitution_to)?;
        let text = self.editor.text();
        if transform::is_blank(&text) {
            return Err(Error::EmptyInput {
                operation: "substitute",
            });
        }
        let result = map.apply(&text);
        self.editor.replace_text(&result.text);
        self.status = format!(
            "{} ({} characters replaced)",
            lines_status(transform::line_count(&result.text)),
            result.changed
        );
        emit_log(
            LogLevel::Info,
            &format!("substituted {} characters", result.changed),
        );
        Ok(())
    }

    /// Preview the repeat with the current count.
    ///
    /// An empty buffer clears the preview without a notice.
    pub fn preview_repeat(&mut self) -> Result<()> {
        let result = RepeatCount::parse(&self.repeat_input)
            .and_then(|count| self.refresh_preview(&PendingTransform::Repeat(count)));
        self.record(result)
    }

    /// Preview the substitution typed into the from/to fields.
    pub fn preview_substitution(&mut self) -> Result<()> {
        let result = SubstitutionMap::new(&self.substitution_from, &self.substitution_to)
            .and_then(|map| self.refresh_preview(&PendingTransform::Substitute(map)));
        self.record(result)
    }

    fn refresh_preview(&mut self, pending: &PendingTransform) -> Result<()> {
        match transform::preview(&self.editor.text(), self.options.preview_lines, pending) {
            Ok(preview) => {
                self.preview = Some(preview);
                Ok(())
            }
            Err(Error::EmptyInput { .. }) => {
                self.preview = None;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Write the buffer to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let result = self.try_save(path);
        self.record(result)
    }

    fn try_save(&mut self, path: &Path) -> Result<()> {
        let text = self.editor.text();
        if transform::is_blank(&text) {
            return Err(Error::EmptyInput { operation: "save" });
        }
        io::save(path, &text)?;
        emit_log(LogLevel::Info, &format!("saved {}", path.display()));
        self.notice = Some(Notice::info(
            "Saved",
            format!("File saved: {}", path.display()),
        ));
        Ok(())
    }

    /// Empty the buffer and forget the loaded file.
    pub fn clear(&mut self) {
        self.editor.set_text("");
        self.current_path = None;
        self.preview = None;
        self.notice = None;
        self.status = lines_status(0);
        emit_log(LogLevel::Debug, "cleared buffer");
    }

    /// Surface an error as a notice and log it, passing the result through.
    fn record(&mut self, result: Result<()>) -> Result<()> {
        if let Err(err) = &result {
            emit_log(err.severity().into(), &err.to_string());
            self.notice = Some(Notice::from_error(err));
        }
        result
    }
}

fn lines_status(lines: usize) -> String {
    format!("Lines: {lines}")
}
