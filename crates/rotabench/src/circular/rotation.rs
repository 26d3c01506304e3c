//! Cyclic permutations of the option letters and row relabeling.

use crate::schema::{ImageCell, QuestionRow, OPTION_LETTERS};

/// An old-letter → new-letter association for one cyclic shift.
///
/// Kept as an explicit ordered list of pairs so iteration order, and with it
/// output row ordering, stays deterministic.
#[derive(Debug, Clone)]
pub struct LetterMap {
    pairs: Vec<(char, char)>,
}

impl LetterMap {
    /// The map that shifts an `n`-letter sequence left by `shift` positions:
    /// `cyclic(4, 1)` is `ABCD → BCDA`.
    pub fn cyclic(n: usize, shift: usize) -> Self {
        let pairs = (0..n)
            .map(|i| (OPTION_LETTERS[i], OPTION_LETTERS[(i + shift) % n]))
            .collect();
        Self { pairs }
    }

    /// Look up the new letter for `old`, if it is part of this map.
    pub fn apply(&self, old: char) -> Option<char> {
        self.pairs.iter().find(|(o, _)| *o == old).map(|(_, n)| *n)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn position(&self, letter: char) -> Option<usize> {
        OPTION_LETTERS[..self.len()].iter().position(|l| *l == letter)
    }
}

/// Build the rotation variant of `row` under `map`, shifted `shift` offsets up.
///
/// Option texts relocate through the map, the answer letter is relabeled
/// through the same map, and the image payload is replaced with a
/// back-reference to the original row. An answer letter outside the map is
/// left unchanged rather than erroring; bucket consistency makes that case
/// unreachable in practice.
pub fn rotate(row: &QuestionRow, map: &LetterMap, offset: u64, shift: u64) -> QuestionRow {
    let n = map.len();
    debug_assert_eq!(n, row.option_count());

    let mut options = vec![String::new(); n];
    for (i, old) in OPTION_LETTERS[..n].iter().enumerate() {
        if let Some(new) = map.apply(*old) {
            if let Some(pos) = map.position(new) {
                options[pos] = row.options[i].clone();
            }
        }
    }

    let answer = match single_letter(&row.answer) {
        Some(letter) => map
            .apply(letter)
            .map(|l| l.to_string())
            .unwrap_or_else(|| row.answer.clone()),
        None => row.answer.clone(),
    };

    QuestionRow {
        index: row.index + offset * shift,
        question: row.question.clone(),
        options,
        answer,
        image: ImageCell::BackRef(row.index),
        extras: row.extras.clone(),
    }
}

fn single_letter(answer: &str) -> Option<char> {
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
