//! 测验评分
//!
//! 逐题比较作答与标准答案，答对得该题全部分值，不设部分分与倒扣。
//! 作答按题目位置（从 0 开始）索引，可以是数组或以位置为键的对象。

use serde_json::Value;

use crate::models::quizzes::entities::{AnswerSheet, QuizQuestion};

/// 评分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeOutcome {
    pub score: i32,
    pub correct_count: usize,
}

/// 宽松整数转换
///
/// 数字向零截断；字符串跳过前导空白后取可选符号与连续数字（`"3abc"` 为 3，
/// `"abc"` 为 0）；布尔值为 1/0；空数组、空对象为 0，非空为 1。
/// `null` 视为未作答，返回 None。
pub fn coerce_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i,
            None => n.as_f64().map(truncate_f64).unwrap_or(0),
        }),
        Value::String(s) => Some(leading_int(s)),
        Value::Array(items) => Some(i64::from(!items.is_empty())),
        Value::Object(map) => Some(i64::from(!map.is_empty())),
    }
}

fn truncate_f64(f: f64) -> i64 {
    if f.is_finite() {
        // `as` 对越界值饱和
        f.trunc() as i64
    } else {
        0
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative { -value } else { value }
}

/// 计算得分。题目需按 position 排好序；多余的作答被忽略，缺失的作答不得分
pub fn grade(questions: &[QuizQuestion], answers: &AnswerSheet) -> GradeOutcome {
    let mut outcome = GradeOutcome {
        score: 0,
        correct_count: 0,
    };

    for (index, question) in questions.iter().enumerate() {
        let Some(correct) = question.correct_answer else {
            continue;
        };
        let Some(given) = answers.answer_at(index).and_then(coerce_to_int) else {
            continue;
        };
        if given == i64::from(correct) {
            outcome.score = outcome.score.saturating_add(question.marks);
            outcome.correct_count += 1;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(position: i32, correct: i32, marks: i32) -> QuizQuestion {
        QuizQuestion {
            id: i64::from(position) + 1,
            quiz_id: 1,
            position,
            question_text: format!("Q{position}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: Some(correct),
            marks,
        }
    }

    fn quiz() -> Vec<QuizQuestion> {
        vec![question(0, 2, 1), question(1, 0, 3), question(2, 1, 5)]
    }

    fn sheet(value: Value) -> AnswerSheet {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_all_correct_scores_total_marks() {
        let outcome = grade(&quiz(), &sheet(json!([2, 0, 1])));
        assert_eq!(outcome.score, 9);
        assert_eq!(outcome.correct_count, 3);
    }

    #[test]
    fn test_empty_submission_scores_zero() {
        assert_eq!(grade(&quiz(), &sheet(json!([]))).score, 0);
        assert_eq!(grade(&quiz(), &sheet(json!({}))).score, 0);
        assert_eq!(grade(&quiz(), &AnswerSheet::default()).score, 0);
    }

    #[test]
    fn test_single_correct_answer_scores_its_marks() {
        let questions = quiz();
        for (i, q) in questions.iter().enumerate() {
            let mut answers = json!({});
            answers[i.to_string()] = json!(q.correct_answer);
            let outcome = grade(&questions, &sheet(answers));
            assert_eq!(outcome.score, q.marks);
            assert_eq!(outcome.correct_count, 1);
        }
    }

    #[test]
    fn test_object_sheet_with_loose_values() {
        let outcome = grade(&quiz(), &sheet(json!({"0": "2", "2": 1.9, "x": 0})));
        assert_eq!(outcome.score, 6);
    }

    #[test]
    fn test_mismatched_lengths() {
        // 多余作答忽略
        assert_eq!(grade(&quiz(), &sheet(json!([2, 0, 1, 3, 3]))).score, 9);
        // 缺少作答不得分
        assert_eq!(grade(&quiz(), &sheet(json!([2]))).score, 1);
        // 越界选项无法匹配
        assert_eq!(grade(&quiz(), &sheet(json!([99, -1, null]))).score, 0);
    }

    #[test]
    fn test_coercion_rules() {
        assert_eq!(coerce_to_int(&json!(3)), Some(3));
        assert_eq!(coerce_to_int(&json!(-2.7)), Some(-2));
        assert_eq!(coerce_to_int(&json!("3abc")), Some(3));
        assert_eq!(coerce_to_int(&json!("  -12x")), Some(-12));
        assert_eq!(coerce_to_int(&json!("abc")), Some(0));
        assert_eq!(coerce_to_int(&json!("")), Some(0));
        assert_eq!(coerce_to_int(&json!(true)), Some(1));
        assert_eq!(coerce_to_int(&json!(false)), Some(0));
        assert_eq!(coerce_to_int(&json!([])), Some(0));
        assert_eq!(coerce_to_int(&json!([0])), Some(1));
        assert_eq!(coerce_to_int(&json!({"k": 1})), Some(1));
        assert_eq!(coerce_to_int(&Value::Null), None);
    }

    #[test]
    fn test_score_saturates_instead_of_wrapping() {
        let questions = vec![question(0, 1, i32::MAX), question(1, 1, i32::MAX)];
        let outcome = grade(&questions, &sheet(json!([1, 1])));
        assert_eq!(outcome.score, i32::MAX);
        assert_eq!(outcome.correct_count, 2);
    }

    #[test]
    fn test_false_matches_option_zero() {
        let questions = vec![question(0, 0, 2)];
        assert_eq!(grade(&questions, &sheet(json!([false]))).score, 2);
    }
}
