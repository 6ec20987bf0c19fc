//! Lexer (tokenizer) for C source code
//!
//! Converts normalized source text into a [`TokenList`] consumed by the
//! parser. Tokens borrow their text from the input; nothing is copied.
//!
//! At each position, after whitespace and comments, the lexer tries in order:
//! string literal, character constant, punctuator (longest match), integer
//! constant, identifier or keyword. A byte that starts none of these is
//! reported and skipped, so lexing always makes progress.

use super::literal::scan_integer;
use super::token::{
    lookup_keyword, match_punctuator, Constant, Rank, Token, TokenKind,
    TokenList,
};
use crate::config::{CompileOptions, DataModel, Standard};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use thiserror::Error;
use tracing::{debug, trace};

/// Fatal lexing failures. Everything else becomes a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { offset: usize },

    #[error("unterminated character constant")]
    UnterminatedCharacter { offset: usize },

    #[error("unterminated comment")]
    UnterminatedComment { offset: usize },

    #[error("out of memory while storing tokens")]
    OutOfMemory,
}

impl LexError {
    /// Where the offending construct starts, if the error has a position.
    pub fn offset(&self) -> Option<usize> {
        match self {
            LexError::UnterminatedString { offset }
            | LexError::UnterminatedCharacter { offset }
            | LexError::UnterminatedComment { offset } => Some(*offset),
            LexError::OutOfMemory => None,
        }
    }
}

/// Lexer for C source code
pub struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    position: usize,
    standard: Standard,
    data_model: DataModel,
    diagnostics: Diagnostics,
}

impl<'src> Lexer<'src> {
    /// Create a lexer with default options.
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, &CompileOptions::default())
    }

    pub fn with_options(source: &'src str, options: &CompileOptions) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            position: 0,
            standard: options.standard,
            data_model: options.data_model,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<TokenList<'src>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;
            if self.is_at_end() {
                break;
            }

            if let Some(token) = self.next_token()? {
                trace!(kind = %token.kind, offset = token.offset, "token");
                tokens.try_reserve(1).map_err(|_| LexError::OutOfMemory)?;
                tokens.push(token);
            }
        }

        debug!(count = tokens.len(), "tokenized");
        Ok(TokenList::new(self.source, tokens))
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Next token, or `None` when the input at the cursor was rejected.
    fn next_token(&mut self) -> Result<Option<Token<'src>>, LexError> {
        let start = self.position;
        let bytes = self.bytes;
        let rest = &bytes[start..];

        match rest[0] {
            b'"' => return self.string_literal().map(Some),
            b'\'' => return self.char_literal(),
            _ => {}
        }

        if let Some((kind, len)) = match_punctuator(&self.source[start..]) {
            return Ok(Some(self.token(kind, start, len)));
        }

        if rest[0].is_ascii_digit() {
            let literal = scan_integer(
                rest,
                self.data_model,
                start,
                &mut self.diagnostics,
            );
            let text = &self.source[start..start + literal.len];
            self.position += literal.len;
            return Ok(Some(Token::constant(text, start, literal.constant)));
        }

        if rest[0].is_ascii_alphabetic() || rest[0] == b'_' {
            return Ok(Some(self.identifier_or_keyword()));
        }

        let unexpected = self.source[start..].chars().next().unwrap_or('\0');
        self.diagnostics
            .report(DiagnosticKind::UnexpectedCharacter(unexpected), start);
        self.position += unexpected.len_utf8().max(1);
        Ok(None)
    }

    fn token(&mut self, kind: TokenKind, start: usize, len: usize) -> Token<'src> {
        self.position = start + len;
        Token::new(kind, &self.source[start..start + len], start)
    }

    /// Scan a string literal. The closing quote is the first `"` preceded by
    /// an even number of backslashes.
    fn string_literal(&mut self) -> Result<Token<'src>, LexError> {
        let start = self.position;
        let mut cursor = start + 1;
        let mut backslashes = 0usize;

        while let Some(&byte) = self.bytes.get(cursor) {
            if byte == b'"' && backslashes % 2 == 0 {
                return Ok(self.token(
                    TokenKind::StringLiteral,
                    start,
                    cursor + 1 - start,
                ));
            }

            if byte.is_ascii_control() {
                self.diagnostics.report(
                    DiagnosticKind::NonPrintableInString(byte),
                    cursor,
                );
            }

            backslashes = if byte == b'\\' { backslashes + 1 } else { 0 };
            cursor += 1;
        }

        Err(LexError::UnterminatedString { offset: start })
    }

    /// Scan a character constant: one character or escape sequence between
    /// single quotes.
    ///
    /// A constant with the wrong number of characters is reported and dropped
    /// up to its closing quote. A quote with no closing quote on the same
    /// line is fatal.
    fn char_literal(&mut self) -> Result<Option<Token<'src>>, LexError> {
        let start = self.position;
        let close = self.find_char_close(start + 1).ok_or(
            LexError::UnterminatedCharacter { offset: start },
        )?;
        let bytes = self.bytes;
        let body = &bytes[start + 1..close];

        let value = match body {
            [b'\\', escape @ ..] if !escape.is_empty() => {
                self.escape_value(escape, start + 1)
            }
            [byte] if *byte != b'\\' => Some(u64::from(*byte)),
            _ => None,
        };

        match value {
            Some(value) => {
                let token = self.token(TokenKind::Constant, start, close + 1 - start);
                Ok(Some(Token {
                    constant: Some(Constant::new(value, Rank::Int)),
                    ..token
                }))
            }
            None => {
                self.diagnostics
                    .report(DiagnosticKind::MalformedCharacter, start);
                self.position = close + 1;
                Ok(None)
            }
        }
    }

    /// Index of the closing `'`, skipping escaped bytes. Stops at a newline.
    fn find_char_close(&self, from: usize) -> Option<usize> {
        let mut cursor = from;
        while let Some(&byte) = self.bytes.get(cursor) {
            match byte {
                b'\'' => return Some(cursor),
                b'\n' => return None,
                b'\\' => cursor += 2,
                _ => cursor += 1,
            }
        }
        None
    }

    /// Value of the escape sequence `escape` (the bytes after the backslash).
    /// Returns `None` if the sequence does not span the whole of `escape`.
    fn escape_value(&mut self, escape: &[u8], offset: usize) -> Option<u64> {
        let simple = match escape[0] {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'v' => Some(0x0B),
            b'\\' | b'\'' | b'"' | b'?' => Some(escape[0]),
            _ => None,
        };
        if let Some(byte) = simple {
            return (escape.len() == 1).then_some(u64::from(byte));
        }

        match escape[0] {
            b'0'..=b'7' => {
                if escape.len() > 3 {
                    return None;
                }
                numeric_escape(escape, 8)
            }
            b'x' => {
                let digits = &escape[1..];
                if digits.is_empty() || digits.len() > 2 {
                    return None;
                }
                numeric_escape(digits, 16)
            }
            other => {
                if escape.len() != 1 {
                    return None;
                }
                self.diagnostics
                    .report(DiagnosticKind::UnknownEscape(char::from(other)), offset);
                Some(u64::from(other))
            }
        }
    }

    fn identifier_or_keyword(&mut self) -> Token<'src> {
        let start = self.position;
        let len = self.bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_alphanumeric() || **byte == b'_')
            .count();
        let word = &self.source[start..start + len];
        let kind =
            lookup_keyword(word, self.standard).unwrap_or(TokenKind::Identifier);
        self.token(kind, start, len)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(byte) if is_space(byte) => self.position += 1,
                Some(b'/') if self.peek_ahead(1) == Some(b'/') => {
                    self.skip_line_comment();
                }
                Some(b'/') if self.peek_ahead(1) == Some(b'*') => {
                    self.skip_block_comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b'\n' {
                break;
            }
            self.position += 1;
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.position;
        let body = &self.bytes[start + 2..];
        match body.windows(2).position(|pair| pair == b"*/") {
            Some(end) => {
                self.position = start + 2 + end + 2;
                Ok(())
            }
            None => Err(LexError::UnterminatedComment { offset: start }),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.position + n).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }
}

/// The C locale's `isspace`.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

fn numeric_escape(digits: &[u8], radix: u32) -> Option<u64> {
    let text = std::str::from_utf8(digits).ok()?;
    u64::from_str_radix(text, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> TokenList<'_> {
        Lexer::new(source).tokenize().unwrap()
    }

    fn first(source: &str) -> Token<'_> {
        lex(source)[0]
    }

    #[test]
    fn test_empty_input() {
        assert!(lex("").is_empty());
        assert!(lex("  \n\t // nothing\n /* here */ ").is_empty());
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            lex("a + b").kinds(),
            vec![TokenKind::Identifier, TokenKind::Plus, TokenKind::Identifier]
        );
    }

    #[test]
    fn test_mixed_tokens() {
        let tokens = lex("i-*=p[\"s\"'c'5ul/x");
        assert_eq!(
            tokens.kinds(),
            vec![
                TokenKind::Identifier,
                TokenKind::Minus,
                TokenKind::StarEqual,
                TokenKind::Identifier,
                TokenKind::OpenBracket,
                TokenKind::StringLiteral,
                TokenKind::Constant,
                TokenKind::Constant,
                TokenKind::Slash,
                TokenKind::Identifier,
            ]
        );
        assert_eq!(tokens[5].text, "\"s\"");
        assert_eq!(tokens[6].constant, Some(Constant::int(u64::from(b'c'))));
        assert_eq!(
            tokens[7].constant,
            Some(Constant::new(5, Rank::UnsignedLong))
        );
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex("int main() { return 0; }");
        assert_eq!(
            tokens.kinds(),
            vec![
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::OpenBrace,
                TokenKind::Return,
                TokenKind::Constant,
                TokenKind::Semicolon,
                TokenKind::CloseBrace,
            ]
        );
        assert_eq!(tokens[1].text, "main");
        assert_eq!(tokens[1].offset, 4);
    }

    #[test]
    fn test_punctuator_longest_match() {
        let token = first("+=");
        assert_eq!((token.kind, token.text), (TokenKind::PlusEqual, "+="));

        assert_eq!(
            lex("+++").kinds(),
            vec![TokenKind::PlusPlus, TokenKind::Plus]
        );
        assert_eq!(first("+-").text, "+");
        assert_eq!(first("[{()}]").kind, TokenKind::OpenBracket);
        assert_eq!(first("<<=").kind, TokenKind::LeftShiftEqual);
        assert_eq!(first("...").kind, TokenKind::Ellipsis);
    }

    #[test]
    fn test_identifiers() {
        for (source, text) in [
            ("int5a", "int5a"),
            ("int_t", "int_t"),
            ("_my_var_", "_my_var_"),
            ("fl;oat", "fl"),
        ] {
            let token = first(source);
            assert_eq!(token.kind, TokenKind::Identifier, "{source}");
            assert_eq!(token.text, text);
        }
    }

    #[test]
    fn test_keywords() {
        assert_eq!(first("float{}").kind, TokenKind::Float);
        assert_eq!(first("do int").kind, TokenKind::Do);
        assert_eq!(first("double").kind, TokenKind::Double);
        assert_eq!(first("_Static_assert").kind, TokenKind::StaticAssertUnderscore);
    }

    #[test]
    fn test_not_identifiers() {
        assert_eq!(first("7a84de").kind, TokenKind::Constant);
        assert_eq!(first(" int").kind, TokenKind::Int);
        assert_eq!(first("[float]").kind, TokenKind::OpenBracket);
    }

    #[test]
    fn test_keywords_follow_standard() {
        let options = CompileOptions::default().with_standard(Standard::C99);
        let mut lexer = Lexer::with_options("bool _Bool", &options);
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(
            tokens.kinds(),
            vec![TokenKind::Identifier, TokenKind::BoolUnderscore]
        );
    }

    #[test]
    fn test_character_constants() {
        let token = first("'c'");
        assert_eq!(token.constant, Some(Constant::int(u64::from(b'c'))));
        assert_eq!(token.text.len(), 3);

        let token = first("'\\''");
        assert_eq!(token.constant, Some(Constant::int(u64::from(b'\''))));
        assert_eq!(token.text.len(), 4);

        assert_eq!(first("'\\n'").constant.unwrap().value, 10);
        assert_eq!(first("'\\0'").constant.unwrap().value, 0);
        assert_eq!(first("'\\x41'").constant.unwrap().value, 0x41);
        assert_eq!(first("'\\101'").constant.unwrap().value, 0o101);
    }

    #[test]
    fn test_malformed_character_is_dropped() {
        let mut lexer = Lexer::new("'' 'ab' 1");
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(tokens.kinds(), vec![TokenKind::Constant]);
        assert_eq!(tokens[0].text, "1");
        assert_eq!(
            lexer.diagnostics().kinds(),
            vec![
                DiagnosticKind::MalformedCharacter,
                DiagnosticKind::MalformedCharacter
            ]
        );
    }

    #[test]
    fn test_unknown_escape_warns() {
        let mut lexer = Lexer::new("'\\q'");
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(tokens[0].constant.unwrap().value, u64::from(b'q'));
        assert_eq!(
            lexer.diagnostics().kinds(),
            vec![DiagnosticKind::UnknownEscape('q')]
        );
    }

    #[test]
    fn test_unterminated_character_is_fatal() {
        let err = Lexer::new("x = 'a;\n").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedCharacter { offset: 4 });
    }

    #[test]
    fn test_string_literal_escapes() {
        let tokens = lex(r#""a\"b" "c\\" d"#);
        assert_eq!(
            tokens.kinds(),
            vec![
                TokenKind::StringLiteral,
                TokenKind::StringLiteral,
                TokenKind::Identifier
            ]
        );
        assert_eq!(tokens[0].text, r#""a\"b""#);
        assert_eq!(tokens[1].text, r#""c\\""#);
    }

    #[test]
    fn test_unterminated_string_is_fatal() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { offset: 0 });
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn test_non_printable_in_string_warns() {
        let mut lexer = Lexer::new("\"a\tb\"");
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            lexer.diagnostics().kinds(),
            vec![DiagnosticKind::NonPrintableInString(b'\t')]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = lex("int x; // comment\nint y; /* block\ncomment */ int z;");
        let names: Vec<_> = tokens
            .iter()
            .filter(|token| token.is(TokenKind::Identifier))
            .map(|token| token.text)
            .collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(tokens.len(), 9);
    }

    #[test]
    fn test_unterminated_comment_is_fatal() {
        let err = Lexer::new("a /* b").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedComment { offset: 2 });
    }

    #[test]
    fn test_unexpected_characters_are_skipped() {
        let mut lexer = Lexer::new("a @ b ` é");
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(
            tokens.kinds(),
            vec![TokenKind::Identifier, TokenKind::Identifier]
        );
        assert_eq!(
            lexer.into_diagnostics().kinds(),
            vec![
                DiagnosticKind::UnexpectedCharacter('@'),
                DiagnosticKind::UnexpectedCharacter('`'),
                DiagnosticKind::UnexpectedCharacter('é'),
            ]
        );
    }

    #[test]
    fn test_token_text_is_a_view_into_source() {
        let source = String::from("int main(void) { return 0x2a + 'c'; }");
        let tokens = lex(&source);
        let range = source.as_bytes().as_ptr_range();

        for token in tokens.iter() {
            assert!(range.contains(&token.text.as_ptr()));
            assert_eq!(&source[token.offset..token.end()], token.text);
        }
    }
}
