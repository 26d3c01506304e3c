//! Question rows: index, question, contiguous options, answer, image.

use indexmap::IndexMap;

use crate::error::{Result, RotabenchError};
use crate::input::DataTable;

/// Option column letters, in order. Questions hold between 2 and 4 options.
pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Maximum supported option count. A populated 5th option aborts the run.
pub const MAX_OPTIONS: usize = 4;

/// Contents of the image column.
///
/// The legacy file format overloads one column: original rows carry an inline
/// base64 payload, generated rows carry the integer index of the row they were
/// derived from. Keeping the distinction as a tagged value internally avoids
/// guessing downstream; the writer flattens it back to the single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCell {
    /// Inline base64-encoded image bytes.
    Payload(String),
    /// Back-reference to the index of the originating row.
    BackRef(u64),
}

impl ImageCell {
    fn parse(cell: &str) -> Self {
        match cell.trim().parse::<u64>() {
            Ok(idx) => ImageCell::BackRef(idx),
            Err(_) => ImageCell::Payload(cell.to_string()),
        }
    }

    /// Flatten back to the single-column text form.
    pub fn to_cell(&self) -> String {
        match self {
            ImageCell::Payload(s) => s.clone(),
            ImageCell::BackRef(idx) => idx.to_string(),
        }
    }
}

/// One question instance.
///
/// Options are contiguous from `A`; `options[0]` is the text of option `A`.
/// Metadata columns the core never interprets ride along in `extras`.
#[derive(Debug, Clone)]
pub struct QuestionRow {
    pub index: u64,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub image: ImageCell,
    pub extras: IndexMap<String, String>,
}

impl QuestionRow {
    /// Effective option count of this row.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Text of the highest-lettered option.
    pub fn last_option(&self) -> &str {
        self.options.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Drop the highest-lettered option, reclassifying the row one bucket
    /// down. The answer letter is deliberately left untouched even when it
    /// named the dropped option.
    pub fn demote(&mut self) {
        self.options.pop();
    }
}

/// A full table of question rows plus the output column order.
#[derive(Debug, Clone)]
pub struct QuestionTable {
    /// Column order for output, taken from the input file.
    pub headers: Vec<String>,
    pub rows: Vec<QuestionRow>,
}

impl QuestionTable {
    /// Interpret a raw table as question rows.
    ///
    /// Fails fast, before any row is transformed, when a row has a populated
    /// 5th option or an index that is not a non-negative integer.
    pub fn from_table(table: &DataTable) -> Result<Self> {
        let idx_col = required(table, "index")?;
        let question_col = required(table, "question")?;
        let answer_col = required(table, "answer")?;
        let image_col = required(table, "image")?;
        let a_col = required(table, "A")?;
        let b_col = required(table, "B")?;
        let c_col = table.column_index("C");
        let d_col = table.column_index("D");
        let e_col = table.column_index("E");

        // Precondition sweep: no populated 5th option anywhere.
        if let Some(e) = e_col {
            for (row_idx, row) in table.rows.iter().enumerate() {
                if !DataTable::is_empty_cell(row.get(e).map(|s| s.as_str()).unwrap_or("")) {
                    return Err(RotabenchError::Schema {
                        row: row_idx + 1,
                        message: "populated option 'E'; only questions with up to 4 choices are supported"
                            .to_string(),
                    });
                }
            }
        }

        let special = [idx_col, question_col, answer_col, image_col, a_col, b_col];
        let option_cols = [Some(a_col), Some(b_col), c_col, d_col];

        let mut rows = Vec::with_capacity(table.row_count());
        for (row_idx, raw) in table.rows.iter().enumerate() {
            let cell = |col: usize| raw.get(col).map(|s| s.as_str()).unwrap_or("");

            let index = cell(idx_col).trim().parse::<u64>().map_err(|_| {
                RotabenchError::Schema {
                    row: row_idx + 1,
                    message: format!("index '{}' is not a non-negative integer", cell(idx_col)),
                }
            })?;

            // Effective option count follows the populated letters: a row
            // without C is 2-choice, without D is 3-choice, otherwise 4.
            let populated =
                |col: Option<usize>| col.is_some_and(|c| !DataTable::is_empty_cell(cell(c)));
            let count = if !populated(c_col) {
                2
            } else if !populated(d_col) {
                3
            } else {
                4
            };

            let options = option_cols[..count]
                .iter()
                .map(|col| col.map(|c| cell(c).to_string()).unwrap_or_default())
                .collect();

            let mut extras = IndexMap::new();
            for (col, header) in table.headers.iter().enumerate() {
                if special.contains(&col)
                    || Some(col) == c_col
                    || Some(col) == d_col
                    || Some(col) == e_col
                {
                    continue;
                }
                extras.insert(header.clone(), cell(col).to_string());
            }

            rows.push(QuestionRow {
                index,
                question: cell(question_col).to_string(),
                options,
                answer: cell(answer_col).trim().to_string(),
                image: ImageCell::parse(cell(image_col)),
                extras,
            });
        }

        // E can only be an all-empty column at this point; drop it from the
        // output schema.
        let headers = table
            .headers
            .iter()
            .filter(|h| h.as_str() != "E")
            .cloned()
            .collect();

        Ok(Self { headers, rows })
    }

    /// Serialize rows back to cells in `self.headers` order.
    pub fn to_records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .map(|header| match header.as_str() {
                        "index" => row.index.to_string(),
                        "question" => row.question.clone(),
                        "answer" => row.answer.clone(),
                        "image" => row.image.to_cell(),
                        h => {
                            if let Some(pos) = OPTION_LETTERS
                                .iter()
                                .position(|l| h.len() == 1 && h.starts_with(*l))
                            {
                                row.options.get(pos).cloned().unwrap_or_default()
                            } else {
                                row.extras.get(h).cloned().unwrap_or_default()
                            }
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

fn required(table: &DataTable, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| RotabenchError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn parse(data: &str) -> DataTable {
        Parser::new().parse_bytes(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_option_counts_from_populated_letters() {
        let table = parse(
            "index\tquestion\tA\tB\tC\tD\tanswer\timage\n\
             1\tq1\tYes\tNo\t\t\tA\tpayload1\n\
             2\tq2\tx\ty\tz\t\tC\tpayload2\n\
             3\tq3\tw\tx\ty\tz\tD\tpayload3\n",
        );
        let qt = QuestionTable::from_table(&table).unwrap();

        assert_eq!(qt.rows[0].option_count(), 2);
        assert_eq!(qt.rows[1].option_count(), 3);
        assert_eq!(qt.rows[2].option_count(), 4);
    }

    #[test]
    fn test_populated_fifth_option_aborts() {
        let table = parse(
            "index\tquestion\tA\tB\tC\tD\tE\tanswer\timage\n\
             1\tq\ta\tb\tc\td\te\tE\tpayload\n",
        );
        let err = QuestionTable::from_table(&table).unwrap_err();
        assert!(matches!(err, RotabenchError::Schema { row: 1, .. }));
    }

    #[test]
    fn test_empty_fifth_option_column_is_tolerated_and_dropped() {
        let table = parse(
            "index\tquestion\tA\tB\tC\tD\tE\tanswer\timage\n\
             1\tq\ta\tb\tc\td\t\tD\tpayload\n",
        );
        let qt = QuestionTable::from_table(&table).unwrap();
        assert!(!qt.headers.iter().any(|h| h == "E"));
    }

    #[test]
    fn test_extras_pass_through_in_order() {
        let table = parse(
            "index\tquestion\tcategory\tA\tB\tanswer\timage\tsplit\n\
             7\tq\tcolor\tred\tblue\tA\tpayload\tdev\n",
        );
        let qt = QuestionTable::from_table(&table).unwrap();
        let extras = &qt.rows[0].extras;

        assert_eq!(extras.get("category").map(|s| s.as_str()), Some("color"));
        assert_eq!(extras.get("split").map(|s| s.as_str()), Some("dev"));

        let records = qt.to_records();
        assert_eq!(
            records[0],
            vec!["7", "q", "color", "red", "blue", "A", "payload", "dev"]
        );
    }

    #[test]
    fn test_image_cell_tagging() {
        assert_eq!(ImageCell::parse("12345"), ImageCell::BackRef(12345));
        assert_eq!(
            ImageCell::parse("iVBORw0KGgo="),
            ImageCell::Payload("iVBORw0KGgo=".to_string())
        );
        assert_eq!(ImageCell::BackRef(5).to_cell(), "5");
    }

    #[test]
    fn test_non_integer_index_aborts() {
        let table = parse("index\tquestion\tA\tB\tanswer\timage\nx1\tq\ta\tb\tA\tp\n");
        assert!(QuestionTable::from_table(&table).is_err());
    }
}
