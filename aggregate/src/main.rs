//! クローズ課題データを処理するユーティリティ
//!
//! このバイナリは、索引ファイルから名詞索引を構築し、クローズ課題の
//! データファイルを文フレームごとに集計して、トークンごとの出現回数と
//! クローズ確率を結果ファイルに書き出します。
//!
//! `no_match`となった応答の件数を最後に報告します。この件数が多い
//! 場合、最頻の回答が索引の名詞コーパスに含まれていない可能性が
//! あります。

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;

use cloze::errors::ClozeError;
use cloze::{aggregate, num_no_match, parse_records, write_results, NounIndex, OutputEncoding};

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "aggregate", about = "Computes cloze probabilities per sentence")]
struct Args {
    /// Common noun index file created by the index command.
    #[clap(long, default_value = "index/index.csv")]
    index: PathBuf,

    /// Cloze task data file. Must contain the sentence and response
    /// columns, identified by header name.
    #[clap(short = 'i', long, default_value = "data.csv")]
    input: PathBuf,

    /// File to which the results are written.
    #[clap(short = 'o', long, default_value = "cloze_results.csv")]
    output: PathBuf,

    /// Name of the column holding the sentence frame.
    #[clap(long, default_value = "sentence")]
    sentence_column: String,

    /// Name of the column holding the response.
    #[clap(long, default_value = "response")]
    response_column: String,

    /// Output encoding. Choices are utf-8 and utf-8-sig (with a BOM,
    /// for MS Excel).
    #[clap(long, default_value = "utf-8-sig")]
    output_encoding: OutputEncoding,
}

/// 集計処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 索引の構築、データの解析、結果の書き出しのエラー
    #[error("Cloze data processing failed: {0}")]
    Cloze(#[from] ClozeError),
}

/// メイン関数
///
/// 索引とデータファイルを読み込み、集計結果を書き出します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、失敗した場合は `AggregateError` を
/// 返します。
fn main() -> Result<(), AggregateError> {
    let args = Args::parse();

    eprintln!("Creating common noun index...");
    let rdr = File::open(&args.index)?;
    let index = NounIndex::from_reader(rdr)?;
    eprintln!("Common noun index created ({} entries).", index.len());

    eprintln!("Processing cloze data...");
    let rdr = File::open(&args.input)?;
    let records = parse_records(rdr, &args.sentence_column, &args.response_column)?;
    eprintln!("Data loaded ({} responses).", records.len());

    let rows = aggregate(&index, &records);

    let wtr = BufWriter::new(File::create(&args.output)?);
    write_results(wtr, &rows, args.output_encoding)?;

    let no_match = num_no_match(&rows);
    if no_match != 0 {
        eprintln!(
            "{no_match} response(s) had no match in the index; \
             the most frequent answers may not be covered by the noun corpus."
        );
    }
    eprintln!("Results written to {}.", args.output.display());
    eprintln!("Done.");
    Ok(())
}
