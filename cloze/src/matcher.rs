//! 応答文字列と名詞索引の照合を行うモジュール
//!
//! このモジュールは、ひとつの応答文字列に含まれる名詞を索引から検出し、
//! 入れ子になった部分一致（例: 「烤鸭」が一致した場合の「鸭」）を
//! 数え上げから除外した一致集合を構築します。

use crate::index::NounIndex;

/// 一致が存在しない場合に出力される番兵トークン
///
/// 索引中のどの名詞も応答に含まれない場合、一致集合はこのトークン
/// ひとつだけを含みます。エラーではなく、索引が応答をカバーして
/// いないことを示す正常な出力値です。
pub const NO_MATCH: &str = "no_match";

/// ひとつの応答に対する一致集合
///
/// 索引から検出された名詞の列（索引の走査順）、または一致がひとつも
/// ない場合は番兵トークン[`NO_MATCH`]のみを保持します。したがって
/// 一致集合が空になることはありません。
///
/// 集合内のどのトークンも、それより前に採用されたトークンの連結
/// 文字列の部分文字列ではありません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet<'i> {
    tokens: Vec<&'i str>,
}

impl<'i> MatchSet<'i> {
    /// 一致したトークンを検出順に返します。
    #[inline(always)]
    pub fn tokens(&self) -> &[&'i str] {
        &self.tokens
    }

    /// 一致集合が番兵トークンのみであるかどうかを返します。
    pub fn is_no_match(&self) -> bool {
        self.tokens == [NO_MATCH]
    }

    /// 一致集合の要素数を返します。
    ///
    /// 番兵トークンにより、常に1以上です。
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// 一致集合が空かどうかを返します。
    ///
    /// 構築規則により、常に `false` を返します。
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl NounIndex {
    /// 応答文字列に含まれる名詞の一致集合を返します。
    ///
    /// 索引を整列順（最長一致優先）に走査し、応答に部分文字列として
    /// 出現する名詞のうち、既に採用した名詞の連結文字列に含まれて
    /// いないものだけを採用します。照合は純粋な部分文字列判定であり、
    /// 単語境界の判定や分かち書きは行いません。
    ///
    /// # 注意
    ///
    /// 冗長な一致の除外は「採用済みトークンの連結文字列に対する包含
    /// 判定」で行われます。これは安価な近似であり、採用済みの複数の
    /// 短いトークンが応答中で隣接していなくても、その連結が偶然
    /// 後続の候補を含んでしまうと、その候補は採用されません。既存の
    /// 解析パイプラインとの互換性のため、この挙動は意図的に維持して
    /// います。
    ///
    /// # 引数
    ///
    /// * `response` - 照合対象の応答文字列
    ///
    /// # 戻り値
    ///
    /// 一致集合。一致がひとつもない場合は[`NO_MATCH`]のみを含みます。
    pub fn match_response(&self, response: &str) -> MatchSet<'_> {
        let mut matched: Vec<&str> = vec![];
        let mut accepted = String::new();
        for token in self.tokens() {
            let token = token.as_str();
            if response.contains(token) && !accepted.contains(token) {
                matched.push(token);
                accepted.push_str(token);
            }
        }
        if matched.is_empty() {
            matched.push(NO_MATCH);
        }
        MatchSet { tokens: matched }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longer_match_suppresses_shorter() {
        let index = NounIndex::new(["鸭", "烤鸭"]).unwrap();
        let matches = index.match_response("烤鸭");
        assert_eq!(matches.tokens(), &["烤鸭"]);
    }

    #[test]
    fn test_no_match_sentinel() {
        let index = NounIndex::new(["猫"]).unwrap();
        let matches = index.match_response("一只狗");
        assert_eq!(matches.tokens(), &[NO_MATCH]);
        assert!(matches.is_no_match());
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_multiple_distinct_matches() {
        let index = NounIndex::new(["猫", "狗"]).unwrap();
        let matches = index.match_response("一只猫和一只狗");
        // Index order for equal lengths is descending lexicographic.
        assert_eq!(matches.tokens(), &["猫", "狗"]);
        assert!(!matches.is_no_match());
    }

    #[test]
    fn test_shorter_token_elsewhere_is_still_suppressed() {
        // 鸭 occurs on its own in the response, but it is contained in the
        // already-accepted 烤鸭, so it is not counted again.
        let index = NounIndex::new(["鸭", "烤鸭"]).unwrap();
        let matches = index.match_response("烤鸭和鸭");
        assert_eq!(matches.tokens(), &["烤鸭"]);
    }

    #[test]
    fn test_containment_invariant() {
        let index = NounIndex::new(["鸭", "烤鸭", "烤", "狗", "热狗"]).unwrap();
        let matches = index.match_response("烤鸭和热狗");
        let mut accepted = String::new();
        for token in matches.tokens() {
            assert!(!accepted.contains(token));
            accepted.push_str(token);
        }
        // 热狗 sorts before 烤鸭 (equal length, descending lexicographic).
        assert_eq!(matches.tokens(), &["热狗", "烤鸭"]);
    }

    #[test]
    fn test_concatenation_heuristic_is_preserved() {
        // 香烤鸭 and 子弹壳 are accepted first; their concatenation
        // 香烤鸭子弹壳 happens to contain 鸭子 across the boundary, so the
        // later candidate is suppressed even though 鸭子 occurs in the
        // response on its own. This imprecision is part of the contract.
        let index = NounIndex::new(["香烤鸭", "子弹壳", "鸭子"]).unwrap();
        let matches = index.match_response("香烤鸭和鸭子和子弹壳");
        assert_eq!(matches.tokens(), &["香烤鸭", "子弹壳"]);
    }

    #[test]
    fn test_coverage_never_empty() {
        let index = NounIndex::new(["猫"]).unwrap();
        for response in ["", "猫", "狗", "一只猫"] {
            assert!(!index.match_response(response).is_empty());
        }
    }
}
