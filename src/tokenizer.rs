//! A module implementing whitespace tokenization of a command line.

use crate::buffer::GrowableBuffer;
use crate::error::ShellError;

/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Token slots allocated before the first growth.
pub const TOKEN_INITIAL_CAPACITY: usize = 64;
/// Token slots added each time a line outgrows its token storage.
pub const TOKEN_GROWTH_INCREMENT: usize = 64;

/// The tokens of one line, each a view into that line.
///
/// The borrow ties every token to the line it came from, so the sequence cannot
/// outlive its input. There is no in-band terminator: [`Tokens::get`] returns
/// `None` one past the last token, which plays the role of the end marker.
#[derive(Debug)]
pub struct Tokens<'line> {
    buf: GrowableBuffer<&'line str>,
}

impl<'line> Tokens<'line> {
    pub fn as_slice(&self) -> &[&'line str] {
        self.buf.as_slice()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// The token at `index`, or `None` at (and past) the end of the sequence.
    pub fn get(&self, index: usize) -> Option<&'line str> {
        self.buf.as_slice().get(index).copied()
    }

    /// The command name, i.e. the first token.
    pub fn command(&self) -> Option<&'line str> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'line str> + '_ {
        self.buf.as_slice().iter().copied()
    }

    /// How many times token storage had to grow while splitting.
    pub fn growths(&self) -> usize {
        self.buf.growths()
    }
}

fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Split `line` into maximal runs of non-delimiter characters.
///
/// Consecutive delimiters collapse, so no token is ever empty, and a blank or
/// delimiter-only line yields an empty sequence.
///
/// # Errors
/// [`ShellError::OutOfMemory`] if the token storage cannot grow.
pub fn split_into_tokens(line: &str) -> Result<Tokens<'_>, ShellError> {
    let mut buf =
        GrowableBuffer::with_capacity(TOKEN_INITIAL_CAPACITY, TOKEN_GROWTH_INCREMENT, "token")?;
    for token in line.split(is_delimiter).filter(|t| !t.is_empty()) {
        buf.push(token)?;
    }
    Ok(Tokens { buf })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_command() {
        let tokens = split_into_tokens("ls -la /tmp").unwrap();
        assert_eq!(tokens.as_slice(), &["ls", "-la", "/tmp"]);
        assert_eq!(tokens.command(), Some("ls"));
        assert_eq!(tokens.get(3), None);
    }

    #[test]
    fn test_delimiter_runs_collapse() {
        let tokens = split_into_tokens("  echo\t\t a \r\n\x07b  ").unwrap();
        assert_eq!(tokens.as_slice(), &["echo", "a", "b"]);
    }

    #[test]
    fn test_delimiter_only_lines_are_empty() {
        for line in ["", " ", "\t\t", " \t\r\n\x07 ", "\x07\x07"] {
            let tokens = split_into_tokens(line).unwrap();
            assert!(tokens.is_empty(), "expected no tokens for {line:?}");
            assert_eq!(tokens.command(), None);
        }
    }

    #[test]
    fn test_tokens_borrow_from_line() {
        let line = String::from("cd  /var/log");
        let tokens = split_into_tokens(&line).unwrap();
        let path = tokens.get(1).unwrap();
        let offset = path.as_ptr() as usize - line.as_ptr() as usize;
        assert_eq!(&line[offset..offset + path.len()], "/var/log");
    }

    #[test]
    fn test_quotes_are_not_special() {
        let tokens = split_into_tokens("echo \"a b\"").unwrap();
        assert_eq!(tokens.as_slice(), &["echo", "\"a", "b\""]);
    }

    #[test]
    fn test_many_tokens_grow_storage() {
        let exact = vec!["w"; TOKEN_INITIAL_CAPACITY].join(" ");
        let tokens = split_into_tokens(&exact).unwrap();
        assert_eq!(tokens.len(), TOKEN_INITIAL_CAPACITY);
        assert_eq!(tokens.growths(), 0);

        let line = (0..150).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let tokens = split_into_tokens(&line).unwrap();
        assert_eq!(tokens.len(), 150);
        assert_eq!(tokens.growths(), 2);
        assert_eq!(tokens.get(149), Some("149"));
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }
}
