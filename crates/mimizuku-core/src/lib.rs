//! # Mimizuku Core
//!
//! OWL2 の識別子・エンティティ・クラス式・公理のデータモデル
//! すべての値は不変で、構造的に比較・ハッシュ可能

pub mod iri;
pub mod vocab;
pub mod literal;
pub mod entity;
pub mod expression;
pub mod axiom;
pub mod signature;

pub use iri::*;
pub use literal::*;
pub use entity::*;
pub use expression::*;
pub use axiom::*;
pub use signature::*;
