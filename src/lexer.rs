use crate::error::ChordError;

/// Token types for a markup line
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Lyric text between chord tokens
    Text(String),
    /// Contents of a `[...]` chord token, brackets removed
    Chord(String),
}

/// A token with its position in the source
#[derive(Debug, Clone)]
pub struct LocatedToken {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Lexer for a single line of chord/lyric markup
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// `line` is the 1-based source line number, used in error positions.
    pub fn new(input: &'a str, line: usize) -> Self {
        Self {
            chars: input.chars().peekable(),
            line,
            column: 1,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.column += 1;
        Some(c)
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    pub fn tokenize(&mut self) -> Result<Vec<LocatedToken>, ChordError> {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut text_column = self.column;

        while let Some(&c) = self.peek() {
            if c != '[' {
                if text.is_empty() {
                    text_column = self.column;
                }
                text.push(c);
                self.advance();
                continue;
            }

            if !text.is_empty() {
                tokens.push(LocatedToken {
                    token: Token::Text(std::mem::take(&mut text)),
                    line: self.line,
                    column: text_column,
                });
            }

            let column = self.column;
            self.advance(); // [
            let chord = self.read_chord(column)?;
            tokens.push(LocatedToken {
                token: Token::Chord(chord),
                line: self.line,
                column,
            });
        }

        if !text.is_empty() {
            tokens.push(LocatedToken {
                token: Token::Text(text),
                line: self.line,
                column: text_column,
            });
        }

        Ok(tokens)
    }

    /// Read chord text up to the closing `]`.
    fn read_chord(&mut self, start_column: usize) -> Result<String, ChordError> {
        let mut chord = String::new();
        loop {
            match self.advance() {
                Some(']') => return Ok(chord.trim().to_string()),
                Some(c) => chord.push(c),
                None => {
                    return Err(ChordError::ParseError {
                        line: self.line,
                        column: start_column,
                        message: format!("Unterminated chord token '[{}'", chord),
                    })
                }
            }
        }
    }
}
