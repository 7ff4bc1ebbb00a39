//! クローズ課題データの読み込みを行うモジュール
//!
//! このモジュールは、文フレームと応答の2カラムを含む区切り形式の
//! データファイルを解析し、型付きレコードの列に変換します。カラムの
//! 特定は固定位置ではなくヘッダ行のカラム名で行い、必要なカラムが
//! 存在しない場合は処理開始前にエラーを返します。

use std::io::Read;

use csv_core::ReadFieldResult;

use crate::errors::{ClozeError, Result};

/// 生データの1行分のレコード
///
/// 文フレーム（課題中に提示される文）と、それに対する参加者の応答の
/// 組です。同じ文フレームを持つレコードが複数存在し、文フレームが
/// 集計時のグループ化キーになります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    /// 文フレームのテキスト
    pub sentence: String,

    /// 参加者の応答テキスト
    pub response: String,
}

/// データファイルを解析してレコードの列を返します。
///
/// 先頭行をヘッダとして解釈し、`sentence_column`と`response_column`で
/// 指定された名前のカラムを特定します。それ以外のカラムは無視され、
/// レコードの順序は入力ファイルの順序のまま保持されます。先頭の
/// UTF-8 BOMは除去されます。データ行のうちすべてのフィールドが空の
/// 行（末尾の空行など）は読み飛ばされます。
///
/// # 引数
///
/// * `rdr` - データファイルのリーダー
/// * `sentence_column` - 文フレームを保持するカラムの名前
/// * `response_column` - 応答を保持するカラムの名前
///
/// # 戻り値
///
/// 成功時は `Ok(Vec<ResponseRecord>)` を返します。
///
/// # エラー
///
/// 指定されたカラム名がヘッダ行に存在しない場合は
/// [`ClozeError::MissingColumn`]を、データ行のフィールド数が必要な
/// カラム位置に満たない場合は不正フォーマットエラーを返します。
pub fn parse_records<R>(
    mut rdr: R,
    sentence_column: &str,
    response_column: &str,
) -> Result<Vec<ResponseRecord>>
where
    R: Read,
{
    let mut buf = vec![];
    rdr.read_to_end(&mut buf)?;
    parse_records_from_bytes(&buf, sentence_column, response_column)
}

pub(crate) fn parse_records_from_bytes(
    mut bytes: &[u8],
    sentence_column: &str,
    response_column: &str,
) -> Result<Vec<ResponseRecord>> {
    if bytes.starts_with(b"\xef\xbb\xbf") {
        bytes = &bytes[3..];
    }

    let mut records = vec![];
    let mut columns: Option<(usize, usize)> = None;
    let mut fields: Vec<String> = vec![];

    let mut rdr = csv_core::Reader::new();
    let mut output = [0; 4096];

    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let (is_field, record_end, done) = match result {
            ReadFieldResult::InputEmpty => (nout != 0 || !fields.is_empty(), true, true),
            ReadFieldResult::OutputFull => {
                return Err(ClozeError::invalid_format("data", "Field too large"))
            }
            ReadFieldResult::Field { record_end } => (true, record_end, false),
            ReadFieldResult::End => (false, false, true),
        };
        if is_field {
            fields.push(std::str::from_utf8(&output[..nout])?.to_string());
            if record_end {
                match columns {
                    None => {
                        columns = Some(locate_columns(
                            &fields,
                            sentence_column,
                            response_column,
                        )?);
                    }
                    Some((sentence_idx, response_idx)) => {
                        if fields.iter().all(|f| f.is_empty()) {
                            // Blank line; nothing to record.
                        } else {
                            let needed = sentence_idx.max(response_idx);
                            if fields.len() <= needed {
                                return Err(ClozeError::invalid_format(
                                    "data",
                                    format!(
                                        "Record with {} field(s) is too short; \
                                         at least {} are required",
                                        fields.len(),
                                        needed + 1
                                    ),
                                ));
                            }
                            records.push(ResponseRecord {
                                sentence: fields[sentence_idx].clone(),
                                response: fields[response_idx].clone(),
                            });
                        }
                    }
                }
                fields.clear();
            }
        }
        if done {
            break;
        }
        bytes = &bytes[nin..];
    }
    if columns.is_none() {
        // No header row at all; the required columns cannot be located.
        return Err(ClozeError::MissingColumn(sentence_column.to_string()));
    }
    Ok(records)
}

/// ヘッダ行から必要な2カラムの位置を特定します。
///
/// # エラー
///
/// どちらかのカラム名が見つからない場合、[`ClozeError::MissingColumn`]を
/// 返します。
fn locate_columns(
    header: &[String],
    sentence_column: &str,
    response_column: &str,
) -> Result<(usize, usize)> {
    let sentence_idx = header
        .iter()
        .position(|h| h == sentence_column)
        .ok_or_else(|| ClozeError::MissingColumn(sentence_column.to_string()))?;
    let response_idx = header
        .iter()
        .position(|h| h == response_column)
        .ok_or_else(|| ClozeError::MissingColumn(response_column.to_string()))?;
    Ok((sentence_idx, response_idx))
}
