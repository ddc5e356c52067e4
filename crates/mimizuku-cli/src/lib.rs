//! # Mimizuku CLI Library
//!
//! Mimizuku のコマンドラインインターフェース
//! 関数型構文のオントロジーファイルから統計とサブグラフ抽出を実行

pub mod commands;

pub use commands::*;
