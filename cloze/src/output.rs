//! 集計結果の書き出しを行うモジュール
//!
//! このモジュールは、集計結果の行をCSV形式でシリアライズします。
//! 既定ではMS Excelでそのまま開けるよう、UTF-8 BOM付きで出力します。

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::aggregator::AggregateRow;
use crate::errors::Result;

/// 出力ファイルのヘッダ行
///
/// 第2カラムの名前は`response`ですが、このカラムが保持するのは生の
/// 応答テキストではなく一致したトークン（または番兵トークン
/// `no_match`）です。既存の解析パイプラインとの互換性のため、
/// カラム名はこのまま維持しています。
pub const OUTPUT_HEADER: [&str; 5] = [
    "sentence",
    "response",
    "count",
    "cloze_probability",
    "number_of_response",
];

/// 出力エンコーディング
///
/// `Utf8Sig`はUTF-8 BOMを先頭に付加した形式で、MS Excelで文字化け
/// せずに開けます。既定値です。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// BOMなしのUTF-8
    Utf8,

    /// BOM付きのUTF-8 (utf-8-sig)
    #[default]
    Utf8Sig,
}

impl FromStr for OutputEncoding {
    type Err = &'static str;

    /// 文字列から出力エンコーディングをパースする
    ///
    /// # 引数
    ///
    /// * `encoding` - パース対象の文字列（"utf-8"または"utf-8-sig"）
    fn from_str(encoding: &str) -> Result<Self, Self::Err> {
        match encoding {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-8-sig" | "utf8-sig" => Ok(Self::Utf8Sig),
            _ => Err("Could not parse an encoding"),
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf-8"),
            Self::Utf8Sig => write!(f, "utf-8-sig"),
        }
    }
}

/// 集計結果をCSV形式で書き出します。
///
/// ヘッダ行の後、集計結果の1行につき1レコードを、与えられた順序の
/// まま出力します。行終端は`\n`であり、区切り文字や引用符を含む
/// フィールドは自動的にクォートされます。
///
/// # 引数
///
/// * `wtr` - 書き込み先のライター
/// * `rows` - 集計結果の行の列
/// * `encoding` - 出力エンコーディング
///
/// # 戻り値
///
/// 成功時は `Ok(())` を返します。
///
/// # エラー
///
/// 書き込み中にI/Oエラーが発生した場合にエラーを返します。
pub fn write_results<W>(
    mut wtr: W,
    rows: &[AggregateRow],
    encoding: OutputEncoding,
) -> Result<()>
where
    W: Write,
{
    if encoding == OutputEncoding::Utf8Sig {
        wtr.write_all(b"\xef\xbb\xbf")?;
    }
    write_record(&mut wtr, OUTPUT_HEADER.iter().copied())?;
    for row in rows {
        let count = row.count.to_string();
        // Debug formatting keeps the decimal point (1.0, not 1) while
        // still printing the shortest round-trip decimal.
        let probability = format!("{:?}", row.cloze_probability);
        let num_responses = row.num_responses.to_string();
        write_record(
            &mut wtr,
            [
                row.sentence.as_str(),
                row.token.as_str(),
                count.as_str(),
                probability.as_str(),
                num_responses.as_str(),
            ]
            .into_iter(),
        )?;
    }
    Ok(())
}

/// 1レコード分のフィールドをカンマ区切りで書き出す
pub(crate) fn write_record<'a, W, I>(mut wtr: W, fields: I) -> std::io::Result<()>
where
    W: Write,
    I: Iterator<Item = &'a str>,
{
    for (i, field) in fields.enumerate() {
        if i != 0 {
            wtr.write_all(b",")?;
        }
        quote_csv_cell(&mut wtr, field.as_bytes())?;
    }
    wtr.write_all(b"\n")
}

/// CSVセルのデータを必要に応じて引用符で囲んで書き出す
fn quote_csv_cell<W>(mut wtr: W, mut data: &[u8]) -> std::io::Result<()>
where
    W: Write,
{
    let mut output = [0; 4096];
    let mut writer = csv_core::Writer::new();
    loop {
        let (result, nin, nout) = writer.field(data, &mut output);
        wtr.write_all(&output[..nout])?;
        if result == csv_core::WriteResult::InputEmpty {
            break;
        }
        data = &data[nin..];
    }
    let (result, nout) = writer.finish(&mut output);
    debug_assert_eq!(result, csv_core::WriteResult::InputEmpty);
    wtr.write_all(&output[..nout])?;
    Ok(())
}
