//! 文ごとの集計を行うモジュール
//!
//! このモジュールは、生データのレコードを文フレームごとにグループ化し、
//! 各応答に対して照合を実行した上で、一致したトークンごとの出現回数と
//! クローズ確率を算出します。

use hashbrown::HashMap;

use crate::index::NounIndex;
use crate::matcher::NO_MATCH;
use crate::records::ResponseRecord;

/// 集計結果の1行
///
/// ひとつの文フレーム内の、ひとつの相異なるトークンに対して
/// ちょうど1行ずつ生成されます。
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    /// 文フレームのテキスト
    pub sentence: String,

    /// 一致したトークン、または番兵トークン[`NO_MATCH`]
    pub token: String,

    /// この文のすべての一致集合を通じたトークンの出現回数
    pub count: usize,

    /// クローズ確率 (`count / num_responses`)
    ///
    /// 常に `0 < cloze_probability <= 1` の範囲にあります。
    pub cloze_probability: f64,

    /// この文に対する応答の総数
    ///
    /// 一致の有無にかかわらず、すべての応答が分母に数えられます。
    pub num_responses: usize,
}

/// すべてのレコードを文フレームごとに集計します。
///
/// 文フレームは入力中の初出順に処理されます（重複は集合として統合）。
/// 文ごとに各応答の一致集合を求めて連結し、相異なるトークンごとに
/// 初出順で1行を生成します。応答がひとつもない文は出力から除外
/// されますが、文フレームは応答との組でのみ現れるため、整形式の
/// 入力からは生じません。
///
/// この関数は純粋であり、同じ入力に対して常に同じ行集合を返します。
///
/// # 引数
///
/// * `index` - 名詞索引
/// * `records` - 生データのレコード列
///
/// # 戻り値
///
/// 集計結果の行の列（文ごと、文の中ではトークンの初出順）
pub fn aggregate(index: &NounIndex, records: &[ResponseRecord]) -> Vec<AggregateRow> {
    // Group responses by sentence frame in first-appearance order.
    let mut order: Vec<&str> = vec![];
    let mut groups: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in records {
        groups
            .entry(record.sentence.as_str())
            .or_insert_with(|| {
                order.push(record.sentence.as_str());
                vec![]
            })
            .push(record.response.as_str());
    }

    let mut rows = vec![];
    for sentence in order {
        let responses = &groups[sentence];
        let n = responses.len();
        if n == 0 {
            // Cannot arise from the grouping above; skip rather than divide.
            continue;
        }

        // Concatenate the match sets of all responses to this sentence.
        let mut matched: Vec<&str> = vec![];
        for response in responses {
            matched.extend(index.match_response(response).tokens());
        }

        // Tally each distinct token in first-appearance order.
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut distinct: Vec<&str> = vec![];
        for &token in &matched {
            *counts
                .entry(token)
                .or_insert_with(|| {
                    distinct.push(token);
                    0
                }) += 1;
        }

        for token in distinct {
            let count = counts[token];
            rows.push(AggregateRow {
                sentence: sentence.to_string(),
                token: token.to_string(),
                count,
                cloze_probability: count as f64 / n as f64,
                num_responses: n,
            });
        }
    }
    rows
}

/// 番兵トークン行が表す応答の総数を返します。
///
/// 索引がどの応答もカバーしなかった件数の要約であり、この値が大きい
/// 場合、最頻の回答が索引の名詞コーパスに含まれていない可能性が
/// あります。
///
/// # 引数
///
/// * `rows` - 集計結果の行の列
pub fn num_no_match(rows: &[AggregateRow]) -> usize {
    rows.iter()
        .filter(|row| row.token == NO_MATCH)
        .map(|row| row.count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sentence: &str, response: &str) -> ResponseRecord {
        ResponseRecord {
            sentence: sentence.to_string(),
            response: response.to_string(),
        }
    }

    #[test]
    fn test_two_distinct_responses() {
        let index = NounIndex::new(["猫", "狗"]).unwrap();
        let records = vec![record("我看到一只___", "猫"), record("我看到一只___", "狗")];
        let rows = aggregate(&index, &records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sentence, "我看到一只___");
        assert_eq!(rows[0].token, "猫");
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[0].cloze_probability, 0.5);
        assert_eq!(rows[0].num_responses, 2);
        assert_eq!(rows[1].token, "狗");
        assert_eq!(rows[1].count, 1);
        assert_eq!(rows[1].cloze_probability, 0.5);
        assert_eq!(rows[1].num_responses, 2);
    }

    #[test]
    fn test_identical_responses_collapse_into_one_row() {
        let index = NounIndex::new(["猫"]).unwrap();
        let records = vec![
            record("我看到一只___", "猫"),
            record("我看到一只___", "猫"),
            record("我看到一只___", "猫"),
        ];
        let rows = aggregate(&index, &records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].token, "猫");
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].cloze_probability, 1.0);
        assert_eq!(rows[0].num_responses, 3);
    }

    #[test]
    fn test_no_match_counts_toward_denominator() {
        let index = NounIndex::new(["猫"]).unwrap();
        let records = vec![
            record("我看到一只___", "猫"),
            record("我看到一只___", "飞机"),
        ];
        let rows = aggregate(&index, &records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].token, "猫");
        assert_eq!(rows[0].cloze_probability, 0.5);
        assert_eq!(rows[1].token, NO_MATCH);
        assert_eq!(rows[1].count, 1);
        assert_eq!(rows[1].cloze_probability, 0.5);
        assert_eq!(num_no_match(&rows), 1);
    }

    #[test]
    fn test_sentences_are_grouped_independently() {
        let index = NounIndex::new(["猫", "狗"]).unwrap();
        let records = vec![
            record("我看到一只___", "猫"),
            record("他养了一只___", "狗"),
            record("我看到一只___", "猫"),
        ];
        let rows = aggregate(&index, &records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sentence, "我看到一只___");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].num_responses, 2);
        assert_eq!(rows[1].sentence, "他养了一只___");
        assert_eq!(rows[1].count, 1);
        assert_eq!(rows[1].num_responses, 1);
        assert_eq!(rows[1].cloze_probability, 1.0);
    }

    #[test]
    fn test_multi_match_response_contributes_multiple_tokens() {
        // One response naming two nouns contributes two tokens, so the
        // per-sentence counts can sum to more than n.
        let index = NounIndex::new(["猫", "狗"]).unwrap();
        let records = vec![record("我看到___", "一只猫和一只狗")];
        let rows = aggregate(&index, &records);
        assert_eq!(rows.len(), 2);
        let total: usize = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, 2);
        assert_eq!(rows[0].num_responses, 1);
        assert_eq!(rows[0].cloze_probability, 1.0);
        assert_eq!(rows[1].cloze_probability, 1.0);
    }

    #[test]
    fn test_idempotence() {
        let index = NounIndex::new(["猫", "狗", "烤鸭", "鸭"]).unwrap();
        let records = vec![
            record("我看到一只___", "猫"),
            record("我看到一只___", "烤鸭"),
            record("他养了一只___", "飞机"),
        ];
        let first = aggregate(&index, &records);
        let second = aggregate(&index, &records);
        assert_eq!(first, second);
    }

    #[test]
    fn test_probability_bounds_and_exactness() {
        let index = NounIndex::new(["猫", "狗"]).unwrap();
        let records = vec![
            record("我看到一只___", "猫"),
            record("我看到一只___", "猫"),
            record("我看到一只___", "狗"),
        ];
        for row in aggregate(&index, &records) {
            assert!(row.cloze_probability > 0.0);
            assert!(row.cloze_probability <= 1.0);
            assert_eq!(
                row.cloze_probability,
                row.count as f64 / row.num_responses as f64
            );
        }
    }
}
