//! # cloze
//!
//! 中国語クローズ課題（文完成課題）の応答データを自動処理するための
//! ライブラリです。
//!
//! ## 概要
//!
//! 各応答文字列に含まれる常用名詞を頻度索引から検出し、入れ子になった
//! 部分一致（例: 「烤鸭」が一致した場合の「鸭」）を除外した上で、
//! 文フレームごとにトークンの出現回数とクローズ確率を集計します。
//!
//! ## 主な機能
//!
//! - **名詞索引**: 最長一致優先の決定的な順序（文字数の降順、次に
//!   辞書順の降順）で照合候補を保持
//! - **照合**: 純粋な部分文字列判定による貪欲な走査と、冗長な
//!   入れ子一致の除外
//! - **集計**: 文ごとの出現回数とクローズ確率（出現回数 / 応答数）の算出
//! - **入出力**: ヘッダ名によるカラム特定つきのCSV読み込みと、
//!   UTF-8 BOM付きCSVの書き出し
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), cloze::errors::ClozeError> {
//! use cloze::{aggregate, parse_records, NounIndex};
//!
//! let index = NounIndex::new(["鸭", "烤鸭", "猫"])?;
//!
//! let data = "sentence,response\n\
//!             今晚我们吃___,烤鸭\n\
//!             今晚我们吃___,烤鸭\n\
//!             今晚我们吃___,披萨\n";
//! let records = parse_records(data.as_bytes(), "sentence", "response")?;
//!
//! let rows = aggregate(&index, &records);
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].token, "烤鸭");
//! assert_eq!(rows[0].count, 2);
//! assert_eq!(rows[0].cloze_probability, 2.0 / 3.0);
//! assert_eq!(rows[1].token, "no_match");
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod errors;
pub mod index;
pub mod matcher;
pub mod output;
pub mod records;
pub mod subtlex;

pub use aggregator::{aggregate, num_no_match, AggregateRow};
pub use index::NounIndex;
pub use matcher::{MatchSet, NO_MATCH};
pub use output::{write_results, OutputEncoding, OUTPUT_HEADER};
pub use records::{parse_records, ResponseRecord};
