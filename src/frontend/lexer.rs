//! The lexer turns GLOSSA source code into a stream of tokens for the parser.
//!
//! GLOSSA specifics handled here: `!` starts a comment that runs to the end of
//! the line, string literals may be delimited by `'` or `"`, `<-` is the
//! assignment operator and has to be told apart from `<=`, `<>` and `<`, and
//! reserved words (including the underscore-spelled ones such as
//! `TELOS_PROGRAMMATOS` or `A_M`) are resolved through the keyword table with
//! identifiers as the fallback.
//!
//! Example:
//! ```rust
//! use glossa::frontend::lexer::Lexer;
//! let tokens_or_err = Lexer::new("x <- 1 + 2").tokenize();
//! ```
//! `tokenize` either returns an error or a queue containing all tokens with a
//! trailing end-of-file token.

use std::{collections::VecDeque, iter::Peekable, str::Chars};

use super::{
    position::Position,
    token::{Token, Type},
};
use crate::error::GlossaError::{self, SyntaxError};

/// Hand-written scanner over a peekable character iterator.
pub struct Lexer<'a> {
    /// The source code; lexemes are sliced out of it.
    source: &'a str,
    /// Peekable iterator over all characters of the source string.
    chars: Peekable<Chars<'a>>,
    /// Queue where the produced tokens are collected.
    tokens: VecDeque<Token<'a>>,
    /// Position of the token currently being scanned; the column resets on
    /// every line break.
    token_pos: Position,
    /// Absolute byte index where the current token starts.
    start_idx: usize,
    /// Absolute byte index of the scan head.
    current_idx: usize,
}

type LexerResult<'a> = Result<Token<'a>, GlossaError>;

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            tokens: VecDeque::new(),
            token_pos: Position::new(1, 1, 0),
            start_idx: 0,
            current_idx: 0,
        }
    }

    /// Tokenize the whole source. Whitespace and comments are dropped; a
    /// final `Eof` token is always appended.
    pub fn tokenize(&mut self) -> Result<VecDeque<Token<'a>>, GlossaError> {
        while !self.is_at_end() {
            self.start_idx = self.current_idx;
            let token = self.next_token()?;
            if token.typ != Type::Whitespace {
                self.tokens.push_back(token);
            }
            self.token_pos.start_column = self.token_pos.end_column + 1;
        }
        self.start_idx = self.current_idx;
        self.tokens.push_back(Token::new(
            Type::Eof,
            Position::new(
                self.token_pos.line,
                self.token_pos.start_column,
                self.token_pos.end_column,
            ),
            "EOF",
        ));
        Ok(self.tokens.clone())
    }

    fn next_token(&mut self) -> LexerResult<'a> {
        match self.advance() {
            Some('(') => self.new_token(Type::LeftParen),
            Some(')') => self.new_token(Type::RightParen),
            Some('[') => self.new_token(Type::LeftBracket),
            Some(']') => self.new_token(Type::RightBracket),
            Some('«') => self.new_token(Type::LeftAnchor),
            Some('»') => self.new_token(Type::RightAnchor),
            Some(',') => self.new_token(Type::Comma),
            Some(':') => self.new_token(Type::Colon),
            Some(';') => self.new_token(Type::Semicolon),
            Some('+') => self.new_token(Type::Plus),
            Some('-') => self.new_token(Type::Minus),
            Some('*') => self.new_token(Type::Mul),
            Some('/') => self.new_token(Type::Div),
            Some('^') => self.new_token(Type::Power),
            Some('=') => self.new_token(Type::Equal),
            // `<` opens four different operators: <- <= <> <
            Some('<') => match self.chars.peek() {
                Some('-') => {
                    self.advance();
                    self.new_token(Type::Assign)
                }
                Some('=') => {
                    self.advance();
                    self.new_token(Type::Leq)
                }
                Some('>') => {
                    self.advance();
                    self.new_token(Type::NotEqual)
                }
                _ => self.new_token(Type::Less),
            },
            Some('>') => match self.advance_if(&|c| c == &'=') {
                Some(_) => self.new_token(Type::Geq),
                _ => self.new_token(Type::Greater),
            },
            // A `!` discloses a comment running to the end of the line.
            Some('!') => {
                self.advance_while(&|c| c != &'\n');
                self.new_token(Type::Whitespace)
            }
            Some(' ') | Some('\t') | Some('\r') => self.new_token(Type::Whitespace),
            Some('\n') => {
                self.token_pos.newline();
                self.new_token(Type::Whitespace)
            }
            Some(q @ '\'') | Some(q @ '"') => self.string(q),
            Some(c) => {
                if c.is_digit(10) {
                    self.number()
                } else if c.is_alphabetic() || c == '_' {
                    self.keyword()
                } else {
                    Err(SyntaxError {
                        pos: self.token_pos,
                        msg: format!("Invalid character '{}'.", c),
                    })
                }
            }
            None => Err(SyntaxError {
                pos: self.token_pos,
                msg: "Invalid input.".to_string(),
            }),
        }
    }

    //-------
    // HELPER
    //-------

    /// Slice of the source covered by the token currently being scanned.
    fn current_lexeme(&self) -> &'a str {
        &self.source[self.start_idx..self.current_idx]
    }

    /// Convenience function for creating non-literal tokens.
    fn new_token(&self, typ: Type) -> LexerResult<'a> {
        Ok(Token::new_non_literal(
            typ,
            self.token_pos,
            self.source,
            self.start_idx..self.current_idx,
        ))
    }

    /// Consume one character and return it, tracking position and byte index.
    fn advance(&mut self) -> Option<char> {
        self.token_pos.advance();
        match self.chars.next() {
            Some(c) => {
                self.current_idx += c.len_utf8();
                Some(c)
            }
            None => None,
        }
    }

    /// Only advance if the next character fulfils the predicate.
    fn advance_if(&mut self, predicate: &dyn Fn(&char) -> bool) -> Option<char> {
        match self.chars.peek() {
            Some(c) if predicate(c) => self.advance(),
            _ => None,
        }
    }

    /// Consume characters while the predicate holds.
    fn advance_while(&mut self, predicate: &dyn Fn(&char) -> bool) {
        loop {
            match self.chars.peek() {
                Some(c) if !predicate(c) => break,
                Some(c) => {
                    if c == &'\n' {
                        self.token_pos.newline();
                    }
                    self.advance();
                }
                None => break,
            }
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek() == None
    }

    //---------
    // Literals
    //---------

    /// Tokenize an integer or decimal literal.
    fn number(&mut self) -> LexerResult<'a> {
        self.advance_while(&|c| c.is_digit(10));
        let mut is_decimal = false;
        if self.chars.peek() == Some(&'.') {
            self.advance();
            match self.chars.peek() {
                Some(c) if c.is_digit(10) => {}
                _ => {
                    return Err(SyntaxError {
                        pos: self.token_pos,
                        msg: "Expected digits after the decimal point.".to_string(),
                    })
                }
            }
            self.advance_while(&|c| c.is_digit(10));
            is_decimal = true;
        }
        let lexeme = self.current_lexeme();
        let typ = if is_decimal {
            let val = lexeme.parse().map_err(|_| SyntaxError {
                pos: self.token_pos,
                msg: format!("Invalid decimal literal '{}'.", lexeme),
            })?;
            Type::Decimal(val)
        } else {
            let val = lexeme.parse().map_err(|_| SyntaxError {
                pos: self.token_pos,
                msg: format!("Integer literal '{}' is out of range.", lexeme),
            })?;
            Type::Integer(val)
        };
        Ok(Token::new(typ, self.token_pos, lexeme))
    }

    /// Tokenize a string literal delimited by `quote`.
    fn string(&mut self, quote: char) -> LexerResult<'a> {
        while !self.is_at_end() && self.chars.peek() != Some(&quote) {
            self.advance();
        }
        if self.is_at_end() {
            return Err(SyntaxError {
                pos: self.token_pos,
                msg: format!("Missing closing {}.", quote),
            });
        }
        // Consume the closing quote.
        self.advance();

        let val = self.source[self.start_idx + quote.len_utf8()..self.current_idx - quote.len_utf8()]
            .to_string();
        Ok(Token::new(
            Type::String(val),
            self.token_pos,
            self.current_lexeme(),
        ))
    }

    //----------------------
    // Identifier & keywords
    //----------------------

    /// Scan a word and look it up in the reserved-word table. Anything not in
    /// the table is an identifier.
    fn keyword(&mut self) -> LexerResult<'a> {
        self.advance_while(&|c| c.is_alphanumeric() || c == &'_');
        let word = self.current_lexeme();
        let typ = Token::get_keyword(word).unwrap_or(Type::Identifier);
        self.new_token(typ)
    }
}
