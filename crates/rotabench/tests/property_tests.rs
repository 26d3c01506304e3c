//! Property-based tests for the circularization pipeline.
//!
//! These generate random benchmark tables and verify the pipeline's
//! invariants: unique output indices, count bookkeeping, back-references,
//! and answer relabeling that keeps pointing at the same option text.

use indexmap::IndexMap;
use proptest::prelude::*;

use rotabench::circular::circularize_table;
use rotabench::schema::{ImageCell, QuestionRow, QuestionTable, OPTION_LETTERS};

/// Option texts, including the catch-alls that trigger demotion.
fn option_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{2,12}( [a-z]{2,12}){0,2}",
        1 => Just("All of the above".to_string()),
        1 => Just("None of the above".to_string()),
    ]
}

/// One question: option texts plus an answer among the populated letters.
fn question() -> impl Strategy<Value = (Vec<String>, usize)> {
    (2usize..=4)
        .prop_flat_map(|n| (prop::collection::vec(option_text(), n), 0..n))
}

fn table(questions: Vec<(Vec<String>, usize)>, base_index: u64) -> QuestionTable {
    let rows = questions
        .into_iter()
        .enumerate()
        .map(|(i, (options, answer_pos))| QuestionRow {
            index: base_index + i as u64,
            question: format!("question {i}"),
            options,
            answer: OPTION_LETTERS[answer_pos].to_string(),
            image: ImageCell::Payload(format!("payload-{i}")),
            extras: IndexMap::new(),
        })
        .collect();

    let headers = ["index", "question", "A", "B", "C", "D", "answer", "image"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    QuestionTable { headers, rows }
}

proptest! {
    #[test]
    fn output_indices_are_unique_and_disjoint_from_originals(
        questions in prop::collection::vec(question(), 1..40),
        base_index in 0u64..2_000_000_000,
    ) {
        let input = table(questions, base_index);
        let original_indices: Vec<u64> = input.rows.iter().map(|r| r.index).collect();

        let (output, stats) = circularize_table(input);

        let mut seen = std::collections::HashSet::new();
        for row in &output.rows {
            prop_assert!(seen.insert(row.index), "duplicate index {}", row.index);
        }
        for idx in &original_indices {
            prop_assert!(stats.offset > *idx);
        }
    }

    #[test]
    fn counts_add_up(
        questions in prop::collection::vec(question(), 1..40),
    ) {
        let input = table(questions, 0);
        let input_rows = input.rows.len();

        let (output, stats) = circularize_table(input);

        prop_assert_eq!(stats.originals, input_rows);
        prop_assert_eq!(
            stats.variants,
            stats.buckets.two + 2 * stats.buckets.three + 3 * stats.buckets.four
        );
        prop_assert_eq!(output.rows.len(), stats.originals + stats.variants);
    }

    #[test]
    fn variants_back_reference_their_original(
        questions in prop::collection::vec(question(), 1..40),
    ) {
        let input = table(questions, 0);
        let input_rows = input.rows.len() as u64;

        let (output, stats) = circularize_table(input);

        for row in &output.rows {
            if row.index < stats.offset {
                // Unrotated rows keep their payload
                prop_assert!(matches!(row.image, ImageCell::Payload(_)));
            } else {
                let origin = row.index % stats.offset;
                prop_assert!(origin < input_rows);
                prop_assert_eq!(&row.image, &ImageCell::BackRef(origin));
            }
        }
    }

    #[test]
    fn relabeled_answers_point_at_the_same_text(
        questions in prop::collection::vec(question(), 1..40),
    ) {
        let input = table(questions, 0);

        let (output, stats) = circularize_table(input);

        // Index the unrotated copies by their index
        let originals: std::collections::HashMap<u64, &QuestionRow> = output
            .rows
            .iter()
            .filter(|r| r.index < stats.offset)
            .map(|r| (r.index, r))
            .collect();

        for row in &output.rows {
            if row.index < stats.offset {
                continue;
            }
            let original = originals[&(row.index % stats.offset)];
            let n = original.option_count();
            prop_assert_eq!(row.option_count(), n);

            // Relocation, not duplication: same texts, shifted
            let mut ours = row.options.clone();
            let mut theirs = original.options.clone();
            ours.sort();
            theirs.sort();
            prop_assert_eq!(&ours, &theirs);

            // If the original answer still names an option after demotion,
            // the variant's answer must select the very same text.
            let answer_pos = OPTION_LETTERS
                .iter()
                .position(|l| original.answer == l.to_string());
            if let Some(pos) = answer_pos {
                if pos < n {
                    let target = &original.options[pos];
                    let variant_pos = OPTION_LETTERS
                        .iter()
                        .position(|l| row.answer == l.to_string())
                        .expect("variant answer is a letter");
                    prop_assert_eq!(&row.options[variant_pos], target);
                } else {
                    // Degenerate demoted case: answer passes through unchanged
                    prop_assert_eq!(&row.answer, &original.answer);
                }
            }
        }
    }
}
