//! Deciding whether a last option is safe to rotate.

use crate::schema::{QuestionRow, OPTION_LETTERS};

/// Whether the text of the last option of an `n`-choice row is a genuine
/// distinct choice.
///
/// Two kinds of text are refused: an enumeration of the other option letters
/// ("A, B and C" names positions, so rotating it would lie), and catch-alls
/// whose tokens include the literal word `all` or `none`. Commas count as
/// separators and the whole test is case-insensitive.
pub fn is_rotatable(last_option: &str, n: usize) -> bool {
    let normalized = last_option.to_lowercase().replace(',', " ");
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let enumerates_others = OPTION_LETTERS[..n - 1].iter().all(|letter| {
        let lower = letter.to_ascii_lowercase();
        tokens.iter().any(|t| t.len() == 1 && t.starts_with(lower))
    });
    if enumerates_others {
        return false;
    }

    !tokens.iter().any(|t| *t == "all" || *t == "none")
}

/// Partition an `n`-choice pool into rotatable rows and demoted rows.
///
/// Demoted rows come back with their last option already dropped, ready to
/// merge into the `n-1` bucket ahead of its native rows.
pub fn split_rotatable(rows: Vec<QuestionRow>, n: usize) -> (Vec<QuestionRow>, Vec<QuestionRow>) {
    let mut eligible = Vec::new();
    let mut demoted = Vec::new();
    for mut row in rows {
        if is_rotatable(row.last_option(), n) {
            eligible.push(row);
        } else {
            row.demote();
            demoted.push(row);
        }
    }
    (eligible, demoted)
}
