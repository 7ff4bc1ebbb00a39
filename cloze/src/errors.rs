//! エラー型の定義
//!
//! このモジュールは、clozeライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt;

/// cloze専用のResult型
///
/// エラー型としてデフォルトで[`ClozeError`]を使用します。
pub type Result<T, E = ClozeError> = std::result::Result<T, E>;

/// clozeのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum ClozeError {
    /// 必須カラムが見つからないエラー
    ///
    /// データファイルのヘッダ行に、指定されたカラム名が存在しない場合に
    /// 発生します。処理開始前に検出され、致命的として扱われます。
    #[error("MissingColumnError: column '{0}' is not present in the header row")]
    MissingColumn(String),

    /// 索引が空であるエラー
    ///
    /// 名詞索引の構築時に有効なエントリがひとつも残らなかった場合に
    /// 発生します。すべての応答が`no_match`になるため、索引ファイルの
    /// 設定ミスの可能性が高く、致命的として扱われます。
    #[error("EmptyDictionaryError: the noun index contains no usable entries")]
    EmptyDictionary,

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 標準I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// UTF-8エンコーディングエラー
    ///
    /// [`std::str::Utf8Error`]のエラーバリアント。
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

impl ClozeError {
    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }
}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}
