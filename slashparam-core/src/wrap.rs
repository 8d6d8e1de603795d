//! Greedy word wrapping for usage text.
//!
//! Text is split on every space character into words and single-space tokens,
//! then packed into lines of at most `width` characters. Lines only break
//! between tokens, so a word wider than `width` ends up on a line of its own.

/// Wrap `text` into lines of at most `width` characters.
///
/// The returned iterator always yields at least one line, even for empty
/// input. Spaces that were appended before a break stay at the end of their
/// line; a space that itself triggers a break is dropped.
///
/// ```
/// let lines: Vec<String> = slashparam_core::wrap("a bb ccc", 3).collect();
/// assert_eq!(lines, ["a ", "bb ", "ccc"]);
/// ```
pub fn wrap(text: &str, width: usize) -> Wrap<'_> {
    Wrap {
        tokens: Tokens::new(text),
        width,
        line: String::new(),
        line_len: 0,
        finished: false,
    }
}

/// Iterator over wrapped lines, created by [`wrap`].
#[derive(Debug, Clone)]
pub struct Wrap<'a> {
    tokens: Tokens<'a>,
    width: usize,
    line: String,
    line_len: usize,
    finished: bool,
}

impl Iterator for Wrap<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        while let Some(token) = self.tokens.next() {
            if self.line_len + token.chars().count() <= self.width {
                self.push(token);
                continue;
            }

            let word = token.trim_start();
            if self.line_len > 0 {
                let line = std::mem::take(&mut self.line);
                self.line_len = 0;
                self.push(word);
                return Some(line);
            }
            self.push(word);
        }

        self.finished = true;
        Some(std::mem::take(&mut self.line))
    }
}

impl Wrap<'_> {
    fn push(&mut self, token: &str) {
        self.line.push_str(token);
        self.line_len += token.chars().count();
    }
}

/// Splits text on each space, yielding the word before it and then the
/// space itself. Every input character lands in exactly one token.
#[derive(Debug, Clone)]
struct Tokens<'a> {
    rest: Option<&'a str>,
    pending_space: bool,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            rest: Some(text),
            pending_space: false,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.pending_space {
            self.pending_space = false;
            return Some(" ");
        }

        let rest = self.rest?;
        match rest.find(' ') {
            Some(idx) => {
                self.rest = Some(&rest[idx + 1..]);
                self.pending_space = true;
                Some(&rest[..idx])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str, width: usize) -> Vec<String> {
        wrap(text, width).collect()
    }

    #[test]
    fn tokens_keep_every_character() {
        let tokens: Vec<&str> = Tokens::new("a  bc ").collect();
        assert_eq!(tokens, ["a", " ", "", " ", "bc", " ", ""]);
        assert_eq!(tokens.concat(), "a  bc ");
    }

    #[test]
    fn greedy_packing_keeps_trailing_spaces() {
        assert_eq!(lines("a bb ccc", 3), ["a ", "bb ", "ccc"]);
        assert_eq!(lines("one two three", 8), ["one two ", "three"]);
    }

    #[test]
    fn space_that_overflows_is_dropped() {
        assert_eq!(lines("abc def", 3), ["abc", "def"]);
    }

    #[test]
    fn text_that_fits_is_a_single_line() {
        assert_eq!(lines("fits on one line", 80), ["fits on one line"]);
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(lines("", 10), [""]);
        assert_eq!(lines("", 0), [""]);
    }

    #[test]
    fn long_words_are_not_split() {
        assert_eq!(lines("a abcdefgh b", 4), ["a ", "abcdefgh", "b"]);
    }

    #[test]
    fn zero_width_puts_each_word_on_its_own_line() {
        assert_eq!(lines("ab cd", 0), ["ab", "cd"]);
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        assert_eq!(lines("äö üß", 5), ["äö üß"]);
        assert_eq!(lines("äöü üß", 4), ["äöü ", "üß"]);
    }

    #[test]
    fn iterator_is_restartable_by_cloning() {
        let iter = wrap("a bb ccc", 3);
        let first: Vec<String> = iter.clone().collect();
        let second: Vec<String> = iter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let mut iter = wrap("x", 5);
        assert_eq!(iter.next().as_deref(), Some("x"));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
