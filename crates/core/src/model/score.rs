use serde::{Serialize, Serializer};
use std::fmt;

/// Points awarded for a correct test answer, in quarter points.
const CORRECT_QUARTERS: i64 = 4;
/// Points deducted for a wrong test answer, in quarter points.
const PENALTY_QUARTERS: i64 = 1;
/// Share of answered questions needed to pass.
pub const PASS_PERCENT: i64 = 60;

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Running test score with negative marking.
///
/// Kept as a whole number of quarter points so that `+1` / `-0.25` updates and
/// the pass threshold comparison are exact. Not floored at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score {
    quarters: i64,
}

impl Score {
    pub const ZERO: Score = Score { quarters: 0 };

    #[must_use]
    pub fn from_quarters(quarters: i64) -> Self {
        Self { quarters }
    }

    #[must_use]
    pub fn quarters(self) -> i64 {
        self.quarters
    }

    /// Score in points, e.g. `0.75`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self) -> f64 {
        self.quarters as f64 / 4.0
    }

    /// `+1` for a correct answer, `-0.25` otherwise.
    pub fn apply(&mut self, correct: bool) {
        if correct {
            self.quarters = self.quarters.saturating_add(CORRECT_QUARTERS);
        } else {
            self.quarters = self.quarters.saturating_sub(PENALTY_QUARTERS);
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => f.write_str("PASS"),
            Verdict::Fail => f.write_str("FAIL"),
        }
    }
}

/// Final outcome of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub score: Score,
    pub total: usize,
    pub verdict: Verdict,
}

impl TestResult {
    /// Points needed to pass: 60% of the questions actually answered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn passing_threshold(&self) -> f64 {
        self.total as f64 * 0.6
    }
}

/// Compute the verdict for `score` over `total_answered` questions.
///
/// `PASS` iff `score >= 0.6 * total_answered`, evaluated in quarter points so
/// the boundary case is exact.
#[must_use]
pub fn compute_result(score: Score, total_answered: usize) -> TestResult {
    let total = i64::try_from(total_answered).unwrap_or(i64::MAX);
    // score * 100 >= 60% * total, both sides scaled to quarter points
    let lhs = score.quarters().saturating_mul(100);
    let rhs = total.saturating_mul(PASS_PERCENT * CORRECT_QUARTERS);
    let verdict = if lhs >= rhs {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    TestResult {
        score,
        total: total_answered,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(outcomes: &[bool]) -> Score {
        let mut score = Score::ZERO;
        for &correct in outcomes {
            score.apply(correct);
        }
        score
    }

    #[test]
    fn correct_adds_one_wrong_subtracts_quarter() {
        let mut score = Score::ZERO;
        score.apply(true);
        assert_eq!(score.value(), 1.0);
        score.apply(false);
        assert_eq!(score.value(), 0.75);
    }

    #[test]
    fn score_can_go_negative() {
        let score = score_of(&[false, false, false]);
        assert_eq!(score.value(), -0.75);
        assert_eq!(score.to_string(), "-0.75");
    }

    #[test]
    fn all_correct_passes() {
        let result = compute_result(score_of(&[true, true, true]), 3);
        assert_eq!(result.score.value(), 3.0);
        assert_eq!(result.total, 3);
        assert_eq!(result.verdict, Verdict::Pass);
    }

    #[test]
    fn one_right_one_wrong_fails() {
        let result = compute_result(score_of(&[true, false]), 2);
        assert_eq!(result.score.value(), 0.75);
        assert!((result.passing_threshold() - 1.2).abs() < 1e-9);
        assert_eq!(result.verdict, Verdict::Fail);
    }

    #[test]
    fn exact_threshold_passes() {
        // 30 of 50: threshold is exactly 30.
        let result = compute_result(Score::from_quarters(30 * 4), 50);
        assert_eq!(result.verdict, Verdict::Pass);
        let result = compute_result(Score::from_quarters(30 * 4 - 1), 50);
        assert_eq!(result.verdict, Verdict::Fail);
        // 5 questions: threshold 3.
        let result = compute_result(Score::from_quarters(12), 5);
        assert_eq!(result.verdict, Verdict::Pass);
    }

    #[test]
    fn zero_answered_passes_with_zero_score() {
        let result = compute_result(Score::ZERO, 0);
        assert_eq!(result.verdict, Verdict::Pass);
    }

    #[test]
    fn result_serializes_verdict_and_fractional_score() {
        let result = compute_result(Score::from_quarters(3), 2);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["score"], 0.75);
        assert_eq!(json["total"], 2);
        assert_eq!(json["verdict"], "FAIL");
    }
}
