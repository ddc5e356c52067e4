//! Functional-style syntax tokens

use logos::Logos;
use std::ops::Range;

use crate::ParseError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\r\n\f]+|#[^\n]*)")]
pub enum Token<'a> {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("=")]
    Equals,

    #[token("^^")]
    DoubleCaret,

    /// `<...>`, brackets stripped.
    #[regex(r"<[^<>\s]*>", |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    FullIri(&'a str),

    /// `prefix:local`, including the bare `prefix:` of a prefix declaration.
    #[regex(r"([A-Za-z][A-Za-z0-9_\-]*)?:[A-Za-z0-9_\-.]*", |lex| lex.slice())]
    PrefixedName(&'a str),

    /// `_:id`, the `_:` stripped.
    #[regex(r"_:[A-Za-z0-9_\-.]+", |lex| &lex.slice()[2..])]
    BlankNode(&'a str),

    /// Quoted lexical form, quotes stripped, escapes still in place.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    QuotedString(&'a str),

    /// `@tag`, the `@` stripped.
    #[regex(r"@[A-Za-z]+(-[A-Za-z0-9]+)*", |lex| &lex.slice()[1..])]
    LangTag(&'a str),

    #[regex(r"[A-Za-z][A-Za-z0-9]*", |lex| lex.slice())]
    Keyword(&'a str),

    #[regex(r"[0-9]+", |lex| lex.slice())]
    Integer(&'a str),
}

impl<'a> Token<'a> {
    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Equals => "'='".to_string(),
            Token::DoubleCaret => "'^^'".to_string(),
            Token::FullIri(iri) => format!("<{}>", iri),
            Token::PrefixedName(name) => name.to_string(),
            Token::BlankNode(id) => format!("_:{}", id),
            Token::QuotedString(s) => format!("\"{}\"", s),
            Token::LangTag(tag) => format!("@{}", tag),
            Token::Keyword(k) => k.to_string(),
            Token::Integer(n) => n.to_string(),
        }
    }
}

/// 1-based line and column (in characters) of a byte offset.
pub fn position(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Tokenize the whole input, failing on the first unrecognized character.
pub fn tokenize(input: &str) -> Result<Vec<(Token<'_>, Range<usize>)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(input);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let (line, column) = position(input, span.start);
                return Err(ParseError::new(
                    line,
                    column,
                    format!("unexpected character sequence {:?}", lexer.slice()),
                ));
            }
        }
    }
    Ok(tokens)
}
