use std::fmt;

/// Non-printable keys, identified by what they do rather than by scan code.
///
/// Left and right variants of a modifier share one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Alt,
    Backspace,
    CapsLock,
    Cmd,
    Ctrl,
    Delete,
    Down,
    End,
    Enter,
    Esc,
    F(u8),
    Fn,
    Home,
    Insert,
    Left,
    NumLock,
    PageDown,
    PageUp,
    Pause,
    PrintScreen,
    Right,
    ScrollLock,
    Shift,
    Space,
    Tab,
    Up,
}

impl NamedKey {
    pub fn name(&self) -> String {
        let name = match self {
            NamedKey::Alt => "alt",
            NamedKey::Backspace => "backspace",
            NamedKey::CapsLock => "caps_lock",
            NamedKey::Cmd => "cmd",
            NamedKey::Ctrl => "ctrl",
            NamedKey::Delete => "delete",
            NamedKey::Down => "down",
            NamedKey::End => "end",
            NamedKey::Enter => "enter",
            NamedKey::Esc => "esc",
            NamedKey::F(n) => return format!("f{n}"),
            NamedKey::Fn => "fn",
            NamedKey::Home => "home",
            NamedKey::Insert => "insert",
            NamedKey::Left => "left",
            NamedKey::NumLock => "num_lock",
            NamedKey::PageDown => "page_down",
            NamedKey::PageUp => "page_up",
            NamedKey::Pause => "pause",
            NamedKey::PrintScreen => "print_screen",
            NamedKey::Right => "right",
            NamedKey::ScrollLock => "scroll_lock",
            NamedKey::Shift => "shift",
            NamedKey::Space => "space",
            NamedKey::Tab => "tab",
            NamedKey::Up => "up",
        };
        name.to_string()
    }

    /// Keys that never reach the accumulator. Backspace and enter are listed
    /// here too; the classifier handles them before this check.
    pub fn is_ignored(&self) -> bool {
        matches!(
            self,
            NamedKey::Alt
                | NamedKey::Backspace
                | NamedKey::CapsLock
                | NamedKey::Ctrl
                | NamedKey::Down
                | NamedKey::End
                | NamedKey::Enter
                | NamedKey::Esc
                | NamedKey::Home
                | NamedKey::Left
                | NamedKey::PageDown
                | NamedKey::PageUp
                | NamedKey::Right
                | NamedKey::Shift
                | NamedKey::Tab
                | NamedKey::Up
        )
    }
}

/// Identity of the key behind a press or release.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyId {
    Named(NamedKey),
    /// Text produced by a printable key.
    Char(String),
    /// A key the hook could not name, carried as its raw label (e.g. `<65027>`).
    Raw(String),
}

impl KeyId {
    pub fn char(c: char) -> Self {
        KeyId::Char(c.to_string())
    }

    pub fn is(&self, named: NamedKey) -> bool {
        matches!(self, KeyId::Named(key) if *key == named)
    }

    pub fn is_ignored(&self) -> bool {
        match self {
            KeyId::Named(key) => key.is_ignored(),
            KeyId::Char(_) | KeyId::Raw(_) => false,
        }
    }

    /// The token appended for this key.
    ///
    /// Labels of non-printable keys lose any single quotes; printable text is
    /// kept verbatim so that an apostrophe is still logged.
    pub fn token(&self) -> String {
        match self {
            KeyId::Char(text) => text.clone(),
            KeyId::Named(_) | KeyId::Raw(_) => self.to_string().replace('\'', ""),
        }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyId::Named(key) => write!(f, "Key.{}", key.name()),
            KeyId::Char(text) => write!(f, "'{text}'"),
            KeyId::Raw(label) => f.write_str(label),
        }
    }
}

impl From<NamedKey> for KeyId {
    fn from(key: NamedKey) -> Self {
        KeyId::Named(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Press(KeyId),
    Release(KeyId),
}
