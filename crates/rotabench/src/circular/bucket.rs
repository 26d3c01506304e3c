//! Partitioning rows by effective option count.

use crate::schema::QuestionRow;

/// Rows grouped by effective option count, in input order within each group.
#[derive(Debug, Default)]
pub struct Buckets {
    pub two: Vec<QuestionRow>,
    pub three: Vec<QuestionRow>,
    pub four: Vec<QuestionRow>,
}

/// Split rows into the 2-, 3-, and 4-choice buckets.
///
/// Rows with a 5th option never reach this point; the parse step rejects
/// them before any transformation starts.
pub fn bucketize(rows: Vec<QuestionRow>) -> Buckets {
    let mut buckets = Buckets::default();
    for row in rows {
        match row.option_count() {
            2 => buckets.two.push(row),
            3 => buckets.three.push(row),
            _ => buckets.four.push(row),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    use crate::schema::ImageCell;

    fn row(index: u64, options: &[&str]) -> QuestionRow {
        QuestionRow {
            index,
            question: format!("q{index}"),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer: "A".to_string(),
            image: ImageCell::Payload("img".to_string()),
            extras: IndexMap::new(),
        }
    }

    #[test]
    fn test_bucketize_preserves_input_order() {
        let rows = vec![
            row(1, &["a", "b", "c", "d"]),
            row(2, &["a", "b"]),
            row(3, &["a", "b", "c"]),
            row(4, &["a", "b"]),
        ];
        let buckets = bucketize(rows);

        assert_eq!(buckets.two.iter().map(|r| r.index).collect::<Vec<_>>(), [2, 4]);
        assert_eq!(buckets.three.iter().map(|r| r.index).collect::<Vec<_>>(), [3]);
        assert_eq!(buckets.four.iter().map(|r| r.index).collect::<Vec<_>>(), [1]);
    }
}
