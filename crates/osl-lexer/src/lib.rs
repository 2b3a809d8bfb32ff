//! Tokenizer for the OSL shading language.
//!
//! `Lexer::tokenize` is the single entry point: it consumes a source
//! buffer and returns either the complete token sequence or the first
//! lexical error encountered. There is no partial result on error and no
//! error recovery -- this mirrors the parser's own first-error-abort
//! contract one stage further up the pipeline.

pub mod cursor;
pub mod error;

pub use error::{LexError, LexErrorKind};

use cursor::Cursor;
use osl_common::{keyword_from_str, word_operator_from_str, Position, Span, Token, TokenKind};

pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            line: 1,
            column: 1,
        }
    }

    /// Tokenize `source` in full, stopping at the first lexical error.
    pub fn tokenize(source: &'src str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            lexer.skip_trivia()?;
            if lexer.peek().is_none() {
                break;
            }
            tokens.push(lexer.next_token()?);
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.cursor.peek()
    }

    fn peek_next(&self) -> Option<char> {
        self.cursor.peek_next()
    }

    fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.cursor.advance()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn here(&self) -> Position {
        Position::new(self.line, self.column)
    }

    // ── Whitespace and comments ─────────────────────────────────────────

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c == ' ' || c == '\t' || c == '\r' || c == '\n' => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    self.lex_block_comment()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Non-nested: terminates on the first `*/`, whether or not earlier
    /// `/` or `*` characters appeared unpaired inside.
    fn lex_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.pos();
        let pos = self.here();
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.peek() {
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedBlockComment,
                        "Unterminated block comment",
                        Span::new(start, self.pos()),
                        pos.line,
                        pos.column,
                    ))
                }
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    fn next_token(&mut self) -> Result<Token, LexError> {
        let c = self.peek().expect("caller checked for EOF");

        if c.is_ascii_digit() {
            return self.lex_number();
        }
        if c == '.' && self.peek_next().is_some_and(|n| n.is_ascii_digit()) {
            return self.lex_number();
        }
        if c == '"' {
            return self.lex_string();
        }
        if c == '\'' {
            return self.lex_char();
        }
        if is_ident_start(c) {
            return Ok(self.lex_ident());
        }

        match c {
            '(' => Ok(self.single(TokenKind::LParen)),
            ')' => Ok(self.single(TokenKind::RParen)),
            '{' => Ok(self.single(TokenKind::LBrace)),
            '}' => Ok(self.single(TokenKind::RBrace)),
            '[' => Ok(self.single(TokenKind::LBracket)),
            ']' => Ok(self.single(TokenKind::RBracket)),
            ',' => Ok(self.single(TokenKind::Comma)),
            ';' => Ok(self.single(TokenKind::Semicolon)),
            ':' => Ok(self.single(TokenKind::Colon)),
            '+' | '-' | '*' | '/' | '%' | '=' | '&' | '~' | '^' | '|' | '<' | '>' | '!' | '?'
            | '.' => self.lex_operator(),
            _ => {
                let start = self.pos();
                let pos = self.here();
                self.advance();
                Err(LexError::new(
                    LexErrorKind::UnknownCharacter,
                    format!("Unexpected character '{}'", c),
                    Span::new(start, self.pos()),
                    pos.line,
                    pos.column,
                ))
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos();
        let pos = self.here();
        self.advance();
        Token::new(kind, Span::new(start, self.pos()), "", pos)
    }

    // ── Symbolic operators (maximal munch) ──────────────────────────────

    fn lex_operator(&mut self) -> Result<Token, LexError> {
        let start = self.pos();
        let pos = self.here();
        let c = self.advance().unwrap();

        let kind = match c {
            '+' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::PlusEq
                } else if self.peek() == Some('+') {
                    self.advance();
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::MinusEq
                } else if self.peek() == Some('-') {
                    self.advance();
                    TokenKind::MinusMinus
                } else if self.peek() == Some('>') {
                    self.advance();
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                // Line comments and block comments are consumed by
                // skip_trivia before we ever reach here.
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '&' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::AmpEq
                } else if self.peek() == Some('&') {
                    self.advance();
                    TokenKind::AmpAmp
                } else {
                    TokenKind::Amp
                }
            }
            '~' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::TildeEq
                } else {
                    TokenKind::Tilde
                }
            }
            '^' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }
            '|' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::PipeEq
                } else if self.peek() == Some('|') {
                    self.advance();
                    TokenKind::PipePipe
                } else {
                    TokenKind::Pipe
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::LtEq
                } else if self.peek() == Some('<') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::LtLtEq
                    } else {
                        TokenKind::LtLt
                    }
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::GtEq
                } else if self.peek() == Some('>') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::GtGtEq
                    } else {
                        TokenKind::GtGt
                    }
                } else {
                    TokenKind::Gt
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::BangEq
                } else {
                    TokenKind::Bang
                }
            }
            '?' => TokenKind::Question,
            '.' => TokenKind::Dot,
            _ => unreachable!("lex_operator dispatched on an unhandled character"),
        };

        let end = self.pos();
        Ok(Token::new(
            kind,
            Span::new(start, end),
            self.cursor.slice(start, end),
            pos,
        ))
    }

    // ── Numeric literals ─────────────────────────────────────────────────

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn lex_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos();
        let pos = self.here();
        let mut is_float = false;

        self.eat_digits();

        if self.peek() == Some('.') {
            is_float = true;
            self.advance(); // .
            self.eat_digits();
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            is_float = true;
            self.advance(); // e/E
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(LexError::new(
                    LexErrorKind::InvalidExponent,
                    "Expected at least one digit in exponent",
                    Span::new(start, self.pos()),
                    pos.line,
                    pos.column,
                ));
            }
            self.eat_digits();
        }

        let end = self.pos();
        let value = self.cursor.slice(start, end).to_string();
        let kind = if is_float {
            TokenKind::LiteralFloat
        } else {
            TokenKind::LiteralInt
        };
        Ok(Token::new(kind, Span::new(start, end), value, pos))
    }

    // ── String and char literals ──────────────────────────────────────────

    fn decode_escape(&mut self, quote: char) -> Result<char, LexError> {
        let start = self.pos();
        let pos = self.here();
        match self.peek() {
            Some(c) => {
                let decoded = match c {
                    'a' => '\u{07}',
                    'b' => '\u{08}',
                    't' => '\t',
                    'n' => '\n',
                    'v' => '\u{0B}',
                    'f' => '\u{0C}',
                    'r' => '\r',
                    '\\' => '\\',
                    '?' => '?',
                    c if c == quote => quote,
                    _ => {
                        self.advance();
                        return Err(LexError::new(
                            LexErrorKind::UnrecognizedEscape,
                            format!("Unrecognized escape sequence '\\{}'", c),
                            Span::new(start, self.pos()),
                            pos.line,
                            pos.column,
                        ));
                    }
                };
                self.advance();
                Ok(decoded)
            }
            None => Err(LexError::new(
                LexErrorKind::UnterminatedString,
                "Unterminated escape sequence at end of input",
                Span::new(start, self.pos()),
                pos.line,
                pos.column,
            )),
        }
    }

    fn lex_string(&mut self) -> Result<Token, LexError> {
        let start = self.pos();
        let pos = self.here();
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedString,
                        "Unterminated string literal",
                        Span::new(start, self.pos()),
                        pos.line,
                        pos.column,
                    ))
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\n') => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedString,
                        "Unterminated string literal (newline before closing quote)",
                        Span::new(start, self.pos()),
                        pos.line,
                        pos.column,
                    ))
                }
                Some('\\') => {
                    self.advance();
                    value.push(self.decode_escape('"')?);
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        let end = self.pos();
        Ok(Token::new(TokenKind::LiteralString, Span::new(start, end), value, pos))
    }

    fn lex_char(&mut self) -> Result<Token, LexError> {
        let start = self.pos();
        let pos = self.here();
        self.advance(); // opening '

        let decoded = match self.peek() {
            None => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedChar,
                    "Unterminated char literal",
                    Span::new(start, self.pos()),
                    pos.line,
                    pos.column,
                ))
            }
            Some('\\') => {
                self.advance();
                self.decode_escape('\'')?
            }
            Some(c) => {
                self.advance();
                c
            }
        };

        match self.peek() {
            Some('\'') => {
                self.advance();
            }
            _ => {
                return Err(LexError::new(
                    LexErrorKind::InvalidCharLiteral,
                    "Expected closing quote for char literal",
                    Span::new(start, self.pos()),
                    pos.line,
                    pos.column,
                ))
            }
        }

        let end = self.pos();
        Ok(Token::new(
            TokenKind::LiteralChar,
            Span::new(start, end),
            decoded.to_string(),
            pos,
        ))
    }

    // ── Identifiers, keywords, word-operators ────────────────────────────

    fn lex_ident(&mut self) -> Token {
        let start = self.pos();
        let pos = self.here();
        self.advance();
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let end = self.pos();
        let text = self.cursor.slice(start, end);

        let kind = word_operator_from_str(text)
            .or_else(|| keyword_from_str(text))
            .unwrap_or(TokenKind::Identifier);

        Token::new(kind, Span::new(start, end), text, pos)
    }
}
