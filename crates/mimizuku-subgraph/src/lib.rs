//! # Mimizuku Subgraph
//!
//! オントロジーからの部分グラフ抽出
//! 近傍探索・最短経路・個体/クラスによる絞り込み・再現可能なサンプリングを行い、
//! 結果を新しいオントロジーとして射影する

use thiserror::Error;

pub mod config;
pub mod extractor;
pub mod graph;
pub mod projection;
pub mod request;
pub mod result;

pub use config::*;
pub use extractor::*;
pub use graph::IndividualGraph;
pub use projection::Closure;
pub use request::*;
pub use result::*;

/// Extraction errors. Empty selections are results, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubgraphError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
