use log::debug;

use crate::error::CaptureError;
use crate::storage::FlushReport;

use super::accumulator::{Accumulator, Position};
use super::key::{KeyEvent, KeyId, NamedKey};

/// Destination of committed lines.
///
/// Implementors must clear the accumulator once the line is durably written
/// and leave it untouched when the write itself fails.
pub trait LineSink {
    fn commit(&mut self, accumulator: &mut Accumulator) -> Result<FlushReport, CaptureError>;
}

/// What a single key event does to the current line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Push(String),
    RemoveLast,
    Flush,
    Ignore,
}

/// Decides the effect of `event` given whether the current line is empty.
pub fn classify(event: &KeyEvent, line_is_empty: bool) -> Action {
    match event {
        KeyEvent::Press(key) => classify_press(key, line_is_empty),
        KeyEvent::Release(key) => {
            if key.is(NamedKey::Enter) && !line_is_empty {
                Action::Flush
            } else {
                Action::Ignore
            }
        }
    }
}

fn classify_press(key: &KeyId, line_is_empty: bool) -> Action {
    match key {
        KeyId::Named(NamedKey::Space) => Action::Push(" ".to_string()),
        KeyId::Named(NamedKey::Backspace) if !line_is_empty => Action::RemoveLast,
        key if !key.is_ignored() => Action::Push(key.token()),
        _ => Action::Ignore,
    }
}

/// Turns the press/release stream into committed lines.
pub struct EventClassifier<S> {
    line: Accumulator,
    sink: S,
}

impl<S: LineSink> EventClassifier<S> {
    pub fn new(sink: S) -> Self {
        Self {
            line: Accumulator::new(),
            sink,
        }
    }

    pub fn line(&self) -> &Accumulator {
        &self.line
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Applies one event. Returns the report of the line committed by it, if
    /// any.
    pub fn handle(&mut self, event: &KeyEvent) -> Result<Option<FlushReport>, CaptureError> {
        match classify(event, self.line.is_empty()) {
            Action::Push(token) => {
                self.line.push(token);
                Ok(None)
            }
            Action::RemoveLast => {
                self.line.remove(Position::Tail);
                Ok(None)
            }
            Action::Flush => {
                debug!("Committing line of {} tokens", self.line.len());
                self.sink.commit(&mut self.line).map(Some)
            }
            Action::Ignore => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingSink {
        lines: Vec<String>,
    }

    impl LineSink for RecordingSink {
        fn commit(&mut self, accumulator: &mut Accumulator) -> Result<FlushReport, CaptureError> {
            let text = accumulator.render();
            self.lines.push(text.clone());
            accumulator.clear();
            Ok(FlushReport {
                path: PathBuf::from("memory"),
                text,
            })
        }
    }

    fn press(key: impl Into<KeyId>) -> KeyEvent {
        KeyEvent::Press(key.into())
    }

    fn release(key: impl Into<KeyId>) -> KeyEvent {
        KeyEvent::Release(key.into())
    }

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars()
            .flat_map(|c| {
                let key = if c == ' ' {
                    KeyId::Named(NamedKey::Space)
                } else {
                    KeyId::char(c)
                };
                [KeyEvent::Press(key.clone()), KeyEvent::Release(key)]
            })
            .collect()
    }

    fn enter() -> [KeyEvent; 2] {
        [press(NamedKey::Enter), release(NamedKey::Enter)]
    }

    fn run(events: impl IntoIterator<Item = KeyEvent>) -> EventClassifier<RecordingSink> {
        let mut classifier = EventClassifier::new(RecordingSink::default());
        for event in events {
            classifier.handle(&event).unwrap();
        }
        classifier
    }

    #[test]
    fn hello_world_is_one_line() {
        let mut events = typed("Hello world");
        events.extend(enter());
        let classifier = run(events);
        assert_eq!(classifier.sink().lines, ["Hello world"]);
        assert!(classifier.line().is_empty());
    }

    #[test]
    fn backspace_removes_most_recent_tokens() {
        let mut events = typed("abc");
        events.push(press(NamedKey::Backspace));
        events.push(press(NamedKey::Backspace));
        events.extend(enter());
        assert_eq!(run(events).sink().lines, ["a"]);
    }

    #[test]
    fn backspace_on_empty_line_is_ignored() {
        let mut events = vec![press(NamedKey::Backspace), release(NamedKey::Backspace)];
        events.extend(typed("x"));
        events.extend(enter());
        assert_eq!(run(events).sink().lines, ["x"]);
    }

    #[test]
    fn second_enter_without_typing_writes_nothing() {
        let mut events = typed("hi");
        events.extend(enter());
        events.extend(enter());
        // Held enter repeats presses, which never flush.
        events.push(press(NamedKey::Enter));
        events.push(press(NamedKey::Enter));
        events.push(release(NamedKey::Enter));
        assert_eq!(run(events).sink().lines, ["hi"]);
    }

    #[test]
    fn ignored_keys_never_touch_the_line() {
        let ignored = [
            NamedKey::Alt,
            NamedKey::CapsLock,
            NamedKey::Ctrl,
            NamedKey::Down,
            NamedKey::End,
            NamedKey::Esc,
            NamedKey::Home,
            NamedKey::Left,
            NamedKey::PageDown,
            NamedKey::PageUp,
            NamedKey::Right,
            NamedKey::Shift,
            NamedKey::Tab,
            NamedKey::Up,
        ];
        let mut classifier = run(typed("ok"));
        for _ in 0..3 {
            for key in ignored {
                classifier.handle(&press(key)).unwrap();
                classifier.handle(&release(key)).unwrap();
            }
        }
        assert_eq!(classifier.line().render(), "ok");
        assert!(classifier.sink().lines.is_empty());
    }

    #[test]
    fn unignored_special_keys_log_their_label() {
        let mut events = typed("a");
        events.push(press(NamedKey::F(2)));
        events.push(press(KeyId::Raw("<65027>".into())));
        events.extend(enter());
        assert_eq!(run(events).sink().lines, ["aKey.f2<65027>"]);
    }

    #[test]
    fn space_press_is_a_single_token() {
        assert_eq!(
            classify(&press(NamedKey::Space), true),
            Action::Push(" ".to_string())
        );
        let classifier = run([press(NamedKey::Space)]);
        assert_eq!(classifier.line().len(), 1);
    }

    #[test]
    fn enter_press_has_no_effect() {
        assert_eq!(classify(&press(NamedKey::Enter), false), Action::Ignore);
        assert_eq!(classify(&release(NamedKey::Enter), true), Action::Ignore);
        assert_eq!(classify(&release(NamedKey::Enter), false), Action::Flush);
    }
}
