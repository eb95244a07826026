use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use rdev::{Event, EventType, Key};
use tokio::sync::mpsc::UnboundedSender;

use crate::keystrokes::{KeyEvent, KeyId, NamedKey};

/// What the hook thread forwards to the capture loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookMessage {
    Key(KeyEvent),
    /// The OS refused (or tore down) the global listener.
    Failed(String),
}

/// Installs the global keyboard hook on a dedicated thread.
///
/// `rdev::listen` blocks for the lifetime of the hook, so the thread is never
/// joined; it ends with the process.
pub fn spawn_hook(tx: UnboundedSender<HookMessage>) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("keyboard-hook".into())
        .spawn(move || {
            let events = tx.clone();
            let result = rdev::listen(move |event| {
                if let Some(key_event) = convert(&event) {
                    // Receiver gone means capture is shutting down.
                    let _ = events.send(HookMessage::Key(key_event));
                }
            });

            if let Err(err) = result {
                let _ = tx.send(HookMessage::Failed(format!("{err:?}")));
            }
        })
        .context("failed to spawn keyboard hook thread")
}

fn convert(event: &Event) -> Option<KeyEvent> {
    match event.event_type {
        EventType::KeyPress(key) => Some(KeyEvent::Press(key_id(key, event.name.as_deref()))),
        EventType::KeyRelease(key) => Some(KeyEvent::Release(key_id(key, None))),
        _ => None,
    }
}

/// Maps an rdev key (plus the text it produced, if any) to a key identity.
pub fn key_id(key: Key, text: Option<&str>) -> KeyId {
    if let Some(named) = named_key(key) {
        return KeyId::Named(named);
    }

    let printable = text.filter(|text| !text.is_empty() && !text.chars().any(char::is_control));
    if let Some(text) = printable {
        return KeyId::Char(text.to_string());
    }

    match key {
        Key::Unknown(code) => KeyId::Raw(format!("<{code}>")),
        other => KeyId::Raw(format!("{other:?}")),
    }
}

fn named_key(key: Key) -> Option<NamedKey> {
    let named = match key {
        Key::Alt | Key::AltGr => NamedKey::Alt,
        Key::Backspace => NamedKey::Backspace,
        Key::CapsLock => NamedKey::CapsLock,
        Key::ControlLeft | Key::ControlRight => NamedKey::Ctrl,
        Key::Delete => NamedKey::Delete,
        Key::DownArrow => NamedKey::Down,
        Key::End => NamedKey::End,
        Key::Escape => NamedKey::Esc,
        Key::F1 => NamedKey::F(1),
        Key::F2 => NamedKey::F(2),
        Key::F3 => NamedKey::F(3),
        Key::F4 => NamedKey::F(4),
        Key::F5 => NamedKey::F(5),
        Key::F6 => NamedKey::F(6),
        Key::F7 => NamedKey::F(7),
        Key::F8 => NamedKey::F(8),
        Key::F9 => NamedKey::F(9),
        Key::F10 => NamedKey::F(10),
        Key::F11 => NamedKey::F(11),
        Key::F12 => NamedKey::F(12),
        Key::Function => NamedKey::Fn,
        Key::Home => NamedKey::Home,
        Key::Insert => NamedKey::Insert,
        Key::LeftArrow => NamedKey::Left,
        Key::MetaLeft | Key::MetaRight => NamedKey::Cmd,
        Key::NumLock => NamedKey::NumLock,
        Key::PageDown => NamedKey::PageDown,
        Key::PageUp => NamedKey::PageUp,
        Key::Pause => NamedKey::Pause,
        Key::PrintScreen => NamedKey::PrintScreen,
        Key::Return | Key::KpReturn => NamedKey::Enter,
        Key::RightArrow => NamedKey::Right,
        Key::ScrollLock => NamedKey::ScrollLock,
        Key::ShiftLeft | Key::ShiftRight => NamedKey::Shift,
        Key::Space => NamedKey::Space,
        Key::Tab => NamedKey::Tab,
        Key::UpArrow => NamedKey::Up,
        _ => return None,
    };
    Some(named)
}
