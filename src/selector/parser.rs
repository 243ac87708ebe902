//! Recursive descent selector parser.
//!
//! Parses selector strings like `.thing, [data-hook~="hello"] > span` into a
//! [`SelectorList`]. Uses the logos-based tokenizer from
//! [`crate::selector::tokenizer`].

use logos::Logos;

use crate::selector::model::*;
use crate::selector::tokenizer::Token;

/// Errors from selector parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

impl SelectorList {
    /// Parse a comma-separated selector list.
    pub fn parse(input: &str) -> Result<SelectorList, ParseError> {
        parse_selector_list(input)
    }
}

/// A positioned token with byte-level span information for whitespace
/// detection (descendant combinators are whitespace).
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    /// Byte offset where this token starts in the source.
    byte_start: usize,
    /// Byte offset where this token ends in the source.
    byte_end: usize,
}

/// Tokenize input using logos with span information preserved.
fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    let mut idx = 0;

    for (result, span) in lexer.spanned() {
        if let Ok(token) = result {
            tokens.push(PToken {
                text: input[span.clone()].to_string(),
                token,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            });
            idx += 1;
        }
    }

    tokens
}

/// Parse a selector string into a [`SelectorList`].
pub fn parse_selector_list(input: &str) -> Result<SelectorList, ParseError> {
    let tokens = tokenize_with_spans(input);
    let mut parser = Parser { tokens, cursor: 0 };

    let mut selectors = Vec::new();
    selectors.push(parser.parse_complex()?);

    while parser.peek().is_some_and(|t| t.token == Token::Comma) {
        parser.advance(); // consume comma
        selectors.push(parser.parse_complex()?);
    }

    if let Some(extra) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            position: extra.pos,
            message: format!("trailing input '{}'", extra.text),
        });
    }

    Ok(SelectorList { selectors })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token is immediately adjacent (no
    /// whitespace) to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Parse a single complex selector: compound selectors with combinators.
    ///
    /// A selector like `ul > li.active` becomes parts:
    /// - SelectorPart::Compound(Compound [Tag("ul")])
    /// - SelectorPart::Combinator(Child)
    /// - SelectorPart::Compound(Compound [Tag("li"), Class("active")])
    fn parse_complex(&mut self) -> Result<ComplexSelector, ParseError> {
        let mut parts = Vec::new();

        parts.push(SelectorPart::Compound(self.parse_compound()?));

        loop {
            match self.peek() {
                // `>` means child combinator
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound()?));
                }
                // A selector-starting token separated from the previous token
                // by whitespace is a descendant combinator. Adjacent tokens
                // were already consumed by parse_compound.
                Some(t)
                    if matches!(
                        t.token,
                        Token::Ident
                            | Token::Hash
                            | Token::Dot
                            | Token::Star
                            | Token::BracketOpen
                    ) =>
                {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound()?));
                }
                // Anything else ends this selector
                _ => break,
            }
        }

        Ok(ComplexSelector { parts })
    }

    /// Parse a compound selector: a sequence of simple selectors with no
    /// whitespace between them, e.g. `div.primary[role="list"]`.
    ///
    /// Uses span-based adjacency detection: `.class`, `#id` and `[attr]` are
    /// only appended to the current compound if they appear immediately after
    /// the previous token (no whitespace gap).
    fn parse_compound(&mut self) -> Result<Compound, ParseError> {
        let mut compound = Compound::new();

        compound.push(self.parse_simple()?);

        loop {
            if !self.is_adjacent() {
                break;
            }
            match self.peek() {
                Some(t)
                    if matches!(
                        t.token,
                        Token::Dot | Token::Hash | Token::BracketOpen
                    ) =>
                {
                    compound.push(self.parse_simple()?);
                }
                _ => break,
            }
        }

        Ok(compound)
    }

    /// Parse one simple selector: tag, `*`, `.class`, `#id`, or `[attr…]`.
    fn parse_simple(&mut self) -> Result<SimpleSelector, ParseError> {
        match self.peek() {
            Some(t) if t.token == Token::Ident => {
                let name = t.text.clone();
                self.advance();
                Ok(SimpleSelector::Tag(name))
            }
            Some(t) if t.token == Token::Star => {
                self.advance();
                Ok(SimpleSelector::Universal)
            }
            Some(t) if t.token == Token::Dot => {
                self.advance();
                let name = self.expect_ident("class name after '.'")?;
                Ok(SimpleSelector::Class(name))
            }
            Some(t) if t.token == Token::Hash => {
                self.advance();
                let name = self.expect_ident("id name after '#'")?;
                Ok(SimpleSelector::Id(name))
            }
            Some(t) if t.token == Token::BracketOpen => {
                self.advance();
                self.parse_attribute()
            }
            _ => Err(ParseError::UnexpectedToken {
                position: self.current_pos(),
                message: "expected selector part".into(),
            }),
        }
    }

    /// Parse the inside of an attribute selector, after the `[`.
    fn parse_attribute(&mut self) -> Result<SimpleSelector, ParseError> {
        let name = self.expect_ident("attribute name after '['")?;

        let test = match self.peek() {
            Some(t) if t.token == Token::Equals => {
                self.advance();
                AttrTest::Equals(self.expect_attr_value()?)
            }
            Some(t) if t.token == Token::TildeEquals => {
                self.advance();
                AttrTest::Includes(self.expect_attr_value()?)
            }
            _ => AttrTest::Exists,
        };

        match self.advance() {
            Some(tok) if tok.token == Token::BracketClose => {
                Ok(SimpleSelector::Attribute { name, test })
            }
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected ']', got '{}'", tok.text),
            }),
            None => Err(ParseError::UnexpectedEof("expected ']'".into())),
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == Token::Ident => Ok(tok.text.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {}, got '{}'", what, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {}", what))),
        }
    }

    /// Attribute values may be quoted (either style) or bare identifiers.
    fn expect_attr_value(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == Token::StringLiteral
                || tok.token == Token::StringLiteralSingle =>
            {
                Ok(tok.text[1..tok.text.len() - 1].to_string())
            }
            Some(tok) if tok.token == Token::Ident => Ok(tok.text.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected attribute value, got '{}'", tok.text),
            }),
            None => Err(ParseError::UnexpectedEof("expected attribute value".into())),
        }
    }
}
