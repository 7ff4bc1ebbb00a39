//! SUBTLEX-CHの語形・品詞頻度表から常用名詞を抽出するモジュール
//!
//! SUBTLEX-CH-WF_PoSの区切り形式エクスポートを解析し、品詞が
//! 常用名詞（`n`）の行だけを取り出して索引ファイルの内容を構築します。
//!
//! エクスポートの構造は次のとおりです。先頭レコードはコーパスの総語数、
//! 2番目のレコードがヘッダです。以降は語ごとの要約レコード（語自身で
//! 始まる）と、`@`で始まる品詞別レコードが交互に並びます。抽出対象は
//! `@`レコードのみであり、語形・品詞・品詞別頻度のカラム（第3カラム
//! 以降）を保持します。

use std::io::Read;

use csv_core::ReadFieldResult;

use crate::errors::{ClozeError, Result};
use crate::output::write_record;

/// 品詞別レコードの先頭マーカー
const POS_MARKER: &str = "@";

/// 常用名詞を表す品詞タグ
const COMMON_NOUN_POS: &str = "n";

/// 語形カラムの位置
const WORD_COL: usize = 2;

/// 品詞カラムの位置
const POS_COL: usize = 3;

/// 品詞別頻度カラムの位置
const FREQ_COL: usize = 4;

/// 抽出された1語分のエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosEntry {
    /// 語形（表層形）
    pub word: String,

    /// 品詞タグ（常に`n`）
    pub pos: String,

    /// 品詞別頻度
    ///
    /// ソースのテキストのまま保持されます。照合アルゴリズムでは使用
    /// されず、索引ファイルにそのまま書き写されます。
    pub frequency: String,
}

/// 抽出結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounExtract {
    /// 索引ファイルに書き出すヘッダ（ソースのヘッダの第3カラム以降）
    pub header: Vec<String>,

    /// 常用名詞のエントリ列（ソースの出現順）
    pub entries: Vec<PosEntry>,
}

/// SUBTLEX-CH-WF_PoSのエクスポートから常用名詞を抽出します。
///
/// # 引数
///
/// * `rdr` - エクスポートファイルのリーダー
///
/// # 戻り値
///
/// 成功時は `Ok(NounExtract)` を返します。
///
/// # エラー
///
/// ヘッダ行のカラム数が不足している場合、または`@`レコードのカラム数が
/// 不足している場合に不正フォーマットエラーを返します。
pub fn extract_common_nouns<R>(mut rdr: R) -> Result<NounExtract>
where
    R: Read,
{
    let mut buf = vec![];
    rdr.read_to_end(&mut buf)?;
    parse_subtlex(&buf)
}

fn parse_subtlex(mut bytes: &[u8]) -> Result<NounExtract> {
    if bytes.starts_with(b"\xef\xbb\xbf") {
        bytes = &bytes[3..];
    }

    let mut header: Option<Vec<String>> = None;
    let mut entries = vec![];
    let mut fields: Vec<String> = vec![];
    let mut record_cnt: usize = 0;

    let mut rdr = csv_core::Reader::new();
    let mut output = [0; 4096];

    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let (is_field, record_end, done) = match result {
            ReadFieldResult::InputEmpty => (nout != 0 || !fields.is_empty(), true, true),
            ReadFieldResult::OutputFull => {
                return Err(ClozeError::invalid_format("SUBTLEX-CH", "Field too large"))
            }
            ReadFieldResult::Field { record_end } => (true, record_end, false),
            ReadFieldResult::End => (false, false, true),
        };
        if is_field {
            fields.push(std::str::from_utf8(&output[..nout])?.to_string());
            if record_end {
                match record_cnt {
                    // The first record carries the corpus word total only.
                    0 => {}
                    1 => {
                        if fields.len() <= FREQ_COL {
                            return Err(ClozeError::invalid_format(
                                "SUBTLEX-CH",
                                "Header row has too few columns",
                            ));
                        }
                        header = Some(fields[WORD_COL..].to_vec());
                    }
                    _ => {
                        if fields[0] == POS_MARKER {
                            if fields.len() <= FREQ_COL {
                                return Err(ClozeError::invalid_format(
                                    "SUBTLEX-CH",
                                    "PoS row has too few columns",
                                ));
                            }
                            if fields[POS_COL] == COMMON_NOUN_POS {
                                entries.push(PosEntry {
                                    word: fields[WORD_COL].clone(),
                                    pos: fields[POS_COL].clone(),
                                    frequency: fields[FREQ_COL].clone(),
                                });
                            }
                        }
                    }
                }
                record_cnt += 1;
                fields.clear();
            }
        }
        if done {
            break;
        }
        bytes = &bytes[nin..];
    }

    let header = header.ok_or_else(|| {
        ClozeError::invalid_format("SUBTLEX-CH", "Missing the header row")
    })?;
    Ok(NounExtract { header, entries })
}

/// 抽出結果を索引ファイルとして書き出します。
///
/// 出力はUTF-8 BOM付きのCSVで、ヘッダ行の後にエントリを1行ずつ
/// 書き出します。
///
/// # 引数
///
/// * `wtr` - 書き込み先のライター
/// * `extract` - 抽出結果
///
/// # エラー
///
/// 書き込み中にI/Oエラーが発生した場合にエラーを返します。
pub fn write_index<W>(mut wtr: W, extract: &NounExtract) -> Result<()>
where
    W: std::io::Write,
{
    wtr.write_all(b"\xef\xbb\xbf")?;
    write_record(&mut wtr, extract.header.iter().map(String::as_str))?;
    for entry in &extract.entries {
        write_record(
            &mut wtr,
            [
                entry.word.as_str(),
                entry.pos.as_str(),
                entry.frequency.as_str(),
            ]
            .into_iter(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Total word count,33546516,,,\n\
,,Word,PoS,PoS.Freq\n\
鸭,,鸭,,\n\
@,,鸭,n,1234\n\
烤,,烤,,\n\
@,,烤,v,99\n\
烤鸭,,烤鸭,,\n\
@,,烤鸭,n,56\n";

    #[test]
    fn test_extracts_only_common_noun_pos_rows() {
        let extract = extract_common_nouns(SAMPLE.as_bytes()).unwrap();
        assert_eq!(extract.header, vec!["Word", "PoS", "PoS.Freq"]);
        assert_eq!(
            extract.entries,
            vec![
                PosEntry {
                    word: "鸭".to_string(),
                    pos: "n".to_string(),
                    frequency: "1234".to_string(),
                },
                PosEntry {
                    word: "烤鸭".to_string(),
                    pos: "n".to_string(),
                    frequency: "56".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_summary_rows_are_skipped_even_for_nouns() {
        // A per-word summary row starts with the word itself, not with @,
        // and must never be extracted.
        let extract = extract_common_nouns(SAMPLE.as_bytes()).unwrap();
        assert!(extract.entries.iter().all(|e| e.pos == "n"));
        assert_eq!(extract.entries.len(), 2);
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let result = extract_common_nouns("Total word count,1\n".as_bytes());
        assert!(matches!(result, Err(ClozeError::InvalidFormat(_))));
    }

    #[test]
    fn test_write_index_round_trips_into_noun_index() {
        let extract = extract_common_nouns(SAMPLE.as_bytes()).unwrap();
        let mut buf = vec![];
        write_index(&mut buf, &extract).unwrap();
        assert!(buf.starts_with(b"\xef\xbb\xbf"));

        let index = crate::index::NounIndex::from_reader(&buf[..]).unwrap();
        assert_eq!(index.tokens(), &["烤鸭", "鸭"]);
    }
}
