use std::sync::LazyLock;

use regex::Regex;

/// Score assigned to a side when no recognizable token is found.
pub const DEFAULT_SCORE: i64 = 5;

static PRO_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PRO[:\s]+(\d+)(?:\s*/\s*10)?").expect("pro score pattern"));
static CON_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CON[:\s]+(\d+)(?:\s*/\s*10)?").expect("con score pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScores {
    pub pro: i64,
    pub con: i64,
}

/// Scrapes `PRO: X/10` / `CON: X/10` style tokens out of free-text judgment
/// output. Matching is case-insensitive and the `/10` suffix is optional.
/// Extracted values are passed through unclamped; a side with no match
/// scores [`DEFAULT_SCORE`].
pub fn parse_scores(feedback: &str) -> RoundScores {
    RoundScores {
        pro: extract(&PRO_SCORE, feedback),
        con: extract(&CON_SCORE, feedback),
    }
}

fn extract(pattern: &Regex, text: &str) -> i64 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(DEFAULT_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_slash_ten_scores() {
        let scores = parse_scores("PRO: 8/10\nCON: 3/10\nWinner: PRO");
        assert_eq!(scores, RoundScores { pro: 8, con: 3 });
    }

    #[test]
    fn extracts_bare_scores() {
        let scores = parse_scores("PRO 7 and CON 4 overall");
        assert_eq!(scores, RoundScores { pro: 7, con: 4 });
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(parse_scores("pro 7"), parse_scores("PRO 7"));
        let scores = parse_scores("Pro: 9/10, con: 2 / 10");
        assert_eq!(scores, RoundScores { pro: 9, con: 2 });
    }

    #[test]
    fn missing_sides_default_to_five() {
        let scores = parse_scores("The judge declined to give numbers.");
        assert_eq!(
            scores,
            RoundScores {
                pro: DEFAULT_SCORE,
                con: DEFAULT_SCORE
            }
        );

        let scores = parse_scores("PRO: 10/10, the other side was absent");
        assert_eq!(scores, RoundScores { pro: 10, con: DEFAULT_SCORE });
    }

    #[test]
    fn out_of_range_scores_pass_through() {
        let scores = parse_scores("PRO: 15\nCON: 0");
        assert_eq!(scores, RoundScores { pro: 15, con: 0 });
    }

    #[test]
    fn colon_and_whitespace_separators_both_match() {
        let scores = parse_scores("PRO:   6\nCON\t2");
        assert_eq!(scores, RoundScores { pro: 6, con: 2 });
    }

    #[test]
    fn absurdly_long_digit_runs_fall_back_to_default() {
        let scores = parse_scores("PRO: 99999999999999999999999999 CON: 3");
        assert_eq!(scores, RoundScores { pro: DEFAULT_SCORE, con: 3 });
    }
}
