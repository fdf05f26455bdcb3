//! Key mapping for the terminal frontend.
//!
//! This module is the malformed-input boundary: raw keystrokes are turned
//! into [`AppEvent`]s here, and direct numeric entry is buffered in
//! [`EntryState`] until commit. Text that does not parse as an integer is
//! absorbed - the buffer reverts and the engine never sees the edit, so
//! rejection-and-revert behaves uniformly for malformed and out-of-range
//! input alike.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use roomalloc_app::{AppEvent, StepDirection};

/// Direct-entry buffer for the focused field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryState {
    buffer: String,
}

impl EntryState {
    /// The pending text, if any digits have been typed.
    pub fn pending(&self) -> Option<&str> {
        if self.buffer.is_empty() { None } else { Some(&self.buffer) }
    }

    fn push_digit(&mut self, digit: char) {
        self.buffer.push(digit);
    }

    fn backspace(&mut self) {
        self.buffer.pop();
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Consume the buffer, returning the typed value if it parses.
    ///
    /// Empty or non-numeric text yields `None`; either way the buffer is
    /// cleared and the field falls back to its last valid value.
    fn commit(&mut self) -> Option<u32> {
        let text = std::mem::take(&mut self.buffer);
        text.parse().ok()
    }
}

/// Maps key events to [`AppEvent`]s, tracking direct entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    entry: EntryState,
    repeat_capable: bool,
}

impl KeyInput {
    /// Create a key mapper.
    ///
    /// `repeat_capable` is whether the terminal reports key release
    /// events. When it does, holding a stepper key arms the runtime's
    /// repeat timer and releasing cancels it; when it does not, every
    /// press is a single step and terminal autorepeat supplies
    /// repetition.
    pub fn new(repeat_capable: bool) -> Self {
        Self { entry: EntryState::default(), repeat_capable }
    }

    /// The direct-entry buffer, for rendering.
    pub fn entry(&self) -> &EntryState {
        &self.entry
    }

    /// Translate one key event into zero or more app events.
    pub fn map(&mut self, key: KeyEvent) -> Vec<AppEvent> {
        match key.kind {
            KeyEventKind::Release => self.map_release(key.code),
            KeyEventKind::Press => self.map_press(key.code),
            // Terminal autorepeat. With release reporting the runtime's
            // own timer paces held steppers, so autorepeat on those keys
            // is dropped to avoid double-stepping.
            KeyEventKind::Repeat => match key.code {
                KeyCode::Char('+' | '=' | '-') | KeyCode::Right | KeyCode::Left
                    if self.repeat_capable =>
                {
                    Vec::new()
                },
                code => self.map_press(code),
            },
        }
    }

    fn map_press(&mut self, code: KeyCode) -> Vec<AppEvent> {
        match code {
            KeyCode::Char('q') => vec![AppEvent::Quit],
            KeyCode::Esc => {
                if self.entry.pending().is_some() {
                    self.entry.clear();
                    Vec::new()
                } else {
                    vec![AppEvent::Quit]
                }
            },

            KeyCode::Tab | KeyCode::Down => self.blur_then(AppEvent::FocusNext),
            KeyCode::BackTab | KeyCode::Up => self.blur_then(AppEvent::FocusPrev),

            KeyCode::Char('+' | '=') | KeyCode::Right => self.stepper(StepDirection::Up),
            KeyCode::Char('-') | KeyCode::Left => self.stepper(StepDirection::Down),

            KeyCode::Char(digit @ '0'..='9') => {
                self.entry.push_digit(digit);
                Vec::new()
            },
            KeyCode::Backspace => {
                self.entry.backspace();
                Vec::new()
            },
            KeyCode::Enter => match self.entry.commit() {
                Some(value) => vec![AppEvent::SetValue { value }],
                // Malformed or empty entry: absorbed, field reverts.
                None => Vec::new(),
            },

            _ => Vec::new(),
        }
    }

    fn map_release(&mut self, code: KeyCode) -> Vec<AppEvent> {
        match code {
            KeyCode::Char('+' | '=' | '-') | KeyCode::Right | KeyCode::Left
                if self.repeat_capable =>
            {
                vec![AppEvent::StepperReleased]
            },
            _ => Vec::new(),
        }
    }

    /// Leaving the field commits pending entry first, like blur.
    fn blur_then(&mut self, focus: AppEvent) -> Vec<AppEvent> {
        match self.entry.commit() {
            Some(value) => vec![AppEvent::SetValue { value }, focus],
            None => vec![focus],
        }
    }

    fn stepper(&mut self, direction: StepDirection) -> Vec<AppEvent> {
        // Stepping discards any half-typed entry.
        self.entry.clear();
        if self.repeat_capable {
            vec![AppEvent::StepperPressed { direction }]
        } else {
            vec![AppEvent::Step { direction }]
        }
    }
}
