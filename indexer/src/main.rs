//! 常用名詞の索引ファイルを作成するユーティリティ
//!
//! このバイナリは、SUBTLEX-CHの語形・品詞頻度表（SUBTLEX-CH-WF_PoSの
//! 区切り形式エクスポート）から品詞が常用名詞の行だけを抽出し、
//! クローズ課題データ処理で使用する索引ファイル（index.csv）を
//! 出力ディレクトリに書き出します。

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;

use cloze::errors::ClozeError;
use cloze::subtlex::{extract_common_nouns, write_index};

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "index", about = "Creates the common noun index from SUBTLEX-CH")]
struct Args {
    /// SUBTLEX-CH word form/PoS frequency table (CSV export of
    /// SUBTLEX-CH-WF_PoS).
    #[clap(short = 'i', long)]
    input: PathBuf,

    /// Directory to which index.csv is written. Created if missing.
    #[clap(short = 'o', long, default_value = "index")]
    output_dir: PathBuf,
}

/// 索引作成中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 抽出・書き出し処理のエラー
    #[error("Index creation failed: {0}")]
    Cloze(#[from] ClozeError),
}

/// メイン関数
///
/// 頻度表を読み込み、常用名詞を抽出して索引ファイルを書き出します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、失敗した場合は `IndexError` を返します。
fn main() -> Result<(), IndexError> {
    let args = Args::parse();

    eprintln!("Loading {}...", args.input.display());
    let rdr = File::open(&args.input)?;
    let extract = extract_common_nouns(rdr)?;
    eprintln!("Extracting common nouns...");

    std::fs::create_dir_all(&args.output_dir)?;
    let output_path = args.output_dir.join("index.csv");
    let wtr = BufWriter::new(File::create(&output_path)?);
    write_index(wtr, &extract)?;

    eprintln!("Total number of common nouns: {}", extract.entries.len());
    eprintln!("Output file is created in {}", output_path.display());
    eprintln!("Done.");
    Ok(())
}
