//! # Mimizuku OFN
//!
//! OWL2 関数型構文 (Functional-Style Syntax) の読み書き
//!
//! - `lexer`: logos によるトークナイザ
//! - `parser`: 再帰下降パーサ (`parse_functional_syntax`)
//! - `writer`: シリアライザ (`to_functional_syntax`)
//!
//! 書き出した文書を読み戻すと、公理集合・IRI・インポート・注釈が一致する。
//! 読み戻せないトークン (空白を含む IRI など) は `WriteError` になる。

pub mod lexer;
pub mod parser;
pub mod writer;

pub use parser::parse_functional_syntax;
pub use writer::{to_functional_syntax, FunctionalSyntaxWriter};

use thiserror::Error;

/// 構文エラー (行・桁は 1 始まり)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// 関数型構文で表せない値
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("IRI cannot be written in functional syntax: <{0}>")]
    UnwritableIri(String),

    #[error("language tag cannot be written in functional syntax: @{0}")]
    UnwritableLanguageTag(String),

    #[error("blank node id cannot be written in functional syntax: _:{0}")]
    UnwritableNodeId(String),
}
