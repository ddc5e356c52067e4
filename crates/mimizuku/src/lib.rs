//! # 🦉 Mimizuku - OWL2 Axiom Store & Subgraph Extraction
//!
//! Mimizuku は OWL2 オントロジーをメモリ上に保持し、個体間の関係を
//! グラフとして扱って部分グラフを切り出すための Rust スタックです。
//!
//! ## Features
//!
//! - **型付きモデル**: エンティティ・クラス式・データ範囲・37 種の公理を閉じた列挙型で表現
//! - **索引付きストア**: 種別・エンティティ・分類・アサーションの二次索引を公理の追加/削除と同期
//! - **部分グラフ抽出**: 近傍 (BFS)・最短経路・個体/クラスによるフィルタ・シード付きサンプリング
//! - **関数型構文**: OWL2 Functional-Style Syntax の読み書き
//!
//! ## Quick Start
//!
//! ```rust
//! use mimizuku::prelude::*;
//!
//! let gene = Class::new("http://example.org/bio#Gene");
//! let associated = ObjectProperty::new("http://example.org/bio#associatedWith");
//!
//! let mut ontology = Ontology::new();
//! let apoe = Individual::from(ontology.create_individual(&gene, "http://example.org/bio#APOE"));
//! let alzheimer = Individual::named("http://example.org/bio#Alzheimer");
//! ontology.add_object_property_assertion(&apoe, &associated, &alzheimer);
//!
//! let extractor = SubgraphExtractor::new(&ontology);
//! let result = extractor.extract_neighborhood(&apoe, 1, false, false);
//! assert_eq!(result.individual_count, 2);
//! ```
//!
//! ## Architecture
//!
//! - **`mimizuku-core`**: IRI・リテラル・エンティティ・式・公理の型
//! - **`mimizuku-store`**: 索引付き公理ストア `Ontology`
//! - **`mimizuku-subgraph`**: 部分グラフ抽出エンジン
//! - **`mimizuku-ofn`**: 関数型構文アダプタ
//! - **`mimizuku-cli`**: `mimizuku` コマンド
//!
//! ## Feature Flags
//!
//! - `full` (default): すべてのライブラリ crate
//! - `core`: 型のみ
//! - `store`: 公理ストア
//! - `subgraph`: 抽出エンジン
//! - `ofn`: 関数型構文の読み書き

#[cfg(feature = "core")]
pub use mimizuku_core as core;

#[cfg(feature = "store")]
pub use mimizuku_store as store;

#[cfg(feature = "subgraph")]
pub use mimizuku_subgraph as subgraph;

#[cfg(feature = "ofn")]
pub use mimizuku_ofn as ofn;

// Convenience re-exports for common types (feature-gated)
#[cfg(feature = "core")]
pub use mimizuku_core::{Axiom, AxiomKind, ClassExpression, Entity, EntityKind, Individual, Iri, Literal};

#[cfg(feature = "store")]
pub use mimizuku_store::{Ontology, OntologyChange, OntologyError, OntologyStatistics};

#[cfg(feature = "subgraph")]
pub use mimizuku_subgraph::{ExtractionConfig, FilterResult, SubgraphError, SubgraphExtractor};

#[cfg(feature = "ofn")]
pub use mimizuku_ofn::{parse_functional_syntax, to_functional_syntax, ParseError, WriteError};

// Commonly used external dependencies
pub use serde;
pub use serde_json;

/// Prelude module for convenient imports
///
/// ```rust
/// use mimizuku::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "core")]
    pub use mimizuku_core::*;

    #[cfg(feature = "store")]
    pub use mimizuku_store::{AxiomId, Edge, Ontology, OntologyChange, OntologyError, OntologyStatistics};

    #[cfg(feature = "subgraph")]
    pub use mimizuku_subgraph::{
        ExtractedPath, ExtractionConfig, FilterResult, SubgraphError, SubgraphExtractor, SubgraphRequest,
        TraversalDirection,
    };

    #[cfg(feature = "ofn")]
    pub use mimizuku_ofn::{parse_functional_syntax, to_functional_syntax, ParseError, WriteError};

    pub use serde::{Deserialize, Serialize};
}

/// Current version of Mimizuku
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
