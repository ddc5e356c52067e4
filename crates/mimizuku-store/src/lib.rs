//! # Mimizuku Store
//!
//! インデックス付き OWL2 公理ストア
//! 公理の集合とオントロジーのメタデータを保持し、エンティティ・クラス所属・
//! プロパティ値・グラフ隣接の索引を常に整合させる

use thiserror::Error;

pub mod change;
pub mod index;
pub mod lookup;
pub mod ontology;
pub mod stats;

pub use change::*;
pub use index::{AxiomId, Edge};
pub use lookup::*;
pub use ontology::*;
pub use stats::*;

/// Store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OntologyError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Multiple matches for {what}: {count} found")]
    MultipleMatches { what: String, count: usize },

    #[error("Axiom not present: {0}")]
    MissingAxiom(String),
}
