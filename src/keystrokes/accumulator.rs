/// Which end of the accumulator a removal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Head,
    Tail,
}

/// Tokens of the line currently being typed, in typing order.
///
/// Each token is one logged character (or a `Key.<name>` label for
/// non-printable keys outside the ignore set). The buffer is cleared after
/// every successful flush and reused for the next line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    tokens: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Removes the token at `position`. Returns `None` on an empty buffer.
    pub fn remove(&mut self, position: Position) -> Option<String> {
        match position {
            Position::Head => self.remove_first(),
            Position::Tail => self.remove_last(),
        }
    }

    pub fn remove_first(&mut self) -> Option<String> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(self.tokens.remove(0))
        }
    }

    pub fn remove_last(&mut self) -> Option<String> {
        self.tokens.pop()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn render(&self) -> String {
        self.tokens.concat()
    }

    pub fn render_with(&self, separator: &str) -> String {
        self.tokens.join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(tokens: &[&str]) -> Accumulator {
        let mut acc = Accumulator::new();
        for token in tokens {
            acc.push(*token);
        }
        acc
    }

    #[test]
    fn render_concatenates_in_typing_order() {
        let acc = filled(&["H", "i", " ", "Key.f1"]);
        assert_eq!(acc.render(), "Hi Key.f1");
        assert_eq!(acc.render_with("|"), "H|i| |Key.f1");
        assert_eq!(acc.len(), 4);
    }

    #[test]
    fn remove_targets_the_requested_end() {
        let mut acc = filled(&["a", "b", "c"]);
        assert_eq!(acc.remove(Position::Tail).as_deref(), Some("c"));
        assert_eq!(acc.remove(Position::Head).as_deref(), Some("a"));
        assert_eq!(acc.tokens(), ["b".to_string()]);
    }

    #[test]
    fn removal_on_empty_buffer_is_a_no_op() {
        let mut acc = Accumulator::new();
        assert_eq!(acc.remove_last(), None);
        assert_eq!(acc.remove_first(), None);
        assert!(acc.is_empty());
        assert_eq!(acc.render(), "");
    }

    #[test]
    fn clear_empties_but_keeps_buffer_usable() {
        let mut acc = filled(&["x", "y"]);
        acc.clear();
        assert!(acc.is_empty());
        acc.push("z");
        assert_eq!(acc.render(), "z");
    }
}
