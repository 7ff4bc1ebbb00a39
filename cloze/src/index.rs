//! 名詞索引を管理するモジュール
//!
//! このモジュールは、応答文字列との照合に使用される常用名詞の索引を提供します。
//! 索引は最長一致優先の走査が正しく動作するよう、決定的な順序で保持されます。

use std::io::Read;

use csv_core::ReadFieldResult;

use crate::errors::{ClozeError, Result};

/// 常用名詞の索引
///
/// 照合候補となる名詞の表層形を、(文字数の降順、次に辞書順の降順) で
/// 整列した列として保持します。この順序により、ある名詞が別の名詞の
/// 部分文字列である場合、必ず長い方が先に照合されます。
///
/// 同一の入力集合からは、入力順序によらず常に同じ索引が構築されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounIndex {
    tokens: Vec<String>,
}

impl NounIndex {
    /// 名詞の集合から新しい索引を構築します。
    ///
    /// 空文字列のエントリは除去されます（空文字列はあらゆる応答に
    /// 自明に一致してしまうため）。重複エントリはひとつに統合されます。
    ///
    /// # 引数
    ///
    /// * `tokens` - 名詞の表層形の列
    ///
    /// # 戻り値
    ///
    /// 成功時は `Ok(NounIndex)` を返します。
    ///
    /// # エラー
    ///
    /// 有効なエントリがひとつも残らない場合、
    /// [`ClozeError::EmptyDictionary`]を返します。
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<String> = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        // Longest first; ties broken by descending lexicographic order so
        // that the result is reproducible for equal-length entries.
        tokens.sort_unstable_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| b.cmp(a))
        });
        tokens.dedup();
        if tokens.is_empty() {
            return Err(ClozeError::EmptyDictionary);
        }
        Ok(Self { tokens })
    }

    /// CSV形式の索引ファイルから新しい索引を構築します。
    ///
    /// 先頭行はヘッダとして読み飛ばされ、以降の各レコードの第1カラムが
    /// 名詞の表層形として採用されます。それ以外のカラム（品詞、頻度など）は
    /// 無視されます。先頭のUTF-8 BOMは除去されます。
    ///
    /// # 引数
    ///
    /// * `rdr` - 索引ファイルのリーダー
    ///
    /// # 戻り値
    ///
    /// 成功時は `Ok(NounIndex)` を返します。
    ///
    /// # エラー
    ///
    /// ファイルフォーマットが不正な場合、または有効なエントリが
    /// 存在しない場合にエラーを返します。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;
        let tokens = Self::parse_index_csv(&buf)?;
        Self::new(tokens)
    }

    pub(crate) fn parse_index_csv(mut bytes: &[u8]) -> Result<Vec<String>> {
        if bytes.starts_with(b"\xef\xbb\xbf") {
            bytes = &bytes[3..];
        }

        let mut tokens = vec![];
        let mut rdr = csv_core::Reader::new();
        let mut output = [0; 4096];
        let mut field_cnt: usize = 0;
        let mut record_cnt: usize = 0;

        loop {
            let (result, nin, nout) = rdr.read_field(bytes, &mut output);
            let (is_field, record_end, done) = match result {
                // A trailing unterminated field is flushed here.
                ReadFieldResult::InputEmpty => (nout != 0 || field_cnt != 0, true, true),
                ReadFieldResult::OutputFull => {
                    return Err(ClozeError::invalid_format("index.csv", "Field too large"))
                }
                ReadFieldResult::Field { record_end } => (true, record_end, false),
                ReadFieldResult::End => (false, false, true),
            };
            if is_field {
                if field_cnt == 0 && record_cnt != 0 {
                    tokens.push(std::str::from_utf8(&output[..nout])?.to_string());
                }
                if record_end {
                    record_cnt += 1;
                    field_cnt = 0;
                } else {
                    field_cnt += 1;
                }
            }
            if done {
                break;
            }
            bytes = &bytes[nin..];
        }
        Ok(tokens)
    }

    /// 索引中の名詞を整列順に返します。
    ///
    /// # 戻り値
    ///
    /// (文字数の降順、辞書順の降順) で整列された名詞のスライス
    #[inline(always)]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// 索引中のエントリ数を返します。
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// 索引が空かどうかを返します。
    ///
    /// 構築時に空の索引は拒否されるため、常に `false` を返します。
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
