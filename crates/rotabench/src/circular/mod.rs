//! The circularization pipeline.
//!
//! Takes a multiple-choice benchmark table and appends, for every question,
//! the non-identity cyclic permutations of its option ordering. Downstream
//! evaluation compares a model's answers across the permuted copies to
//! measure its sensitivity to answer-option order.
//!
//! The pipeline is a pure, sequential batch transformation: bucket rows by
//! option count, demote rows whose last option is not rotatable, generate
//! rotation variants per bucket, and concatenate everything with
//! collision-free indices.

mod allocator;
mod bucket;
mod eligibility;
mod rotation;

pub use allocator::{compute_offset, BASE_OFFSET};
pub use bucket::{bucketize, Buckets};
pub use eligibility::{is_rotatable, split_rotatable};
pub use rotation::{rotate, LetterMap};

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::input::{Parser, SourceMetadata};
use crate::output;
use crate::schema::QuestionTable;

/// Suffix marking the circularized sibling of an input file.
pub const CIRC_SUFFIX: &str = "_CIRC";

/// Final bucket sizes after demotion.
#[derive(Debug, Clone, Serialize)]
pub struct BucketCounts {
    pub two: usize,
    pub three: usize,
    pub four: usize,
}

/// What the in-memory transformation did.
#[derive(Debug, Clone, Serialize)]
pub struct CircularStats {
    /// Index offset per shift amount.
    pub offset: u64,
    /// Rows carried over unrotated.
    pub originals: usize,
    /// Rotation variants generated.
    pub variants: usize,
    pub buckets: BucketCounts,
}

/// Result of circularizing a file.
#[derive(Debug, Clone, Serialize)]
pub struct CircularReport {
    pub input: SourceMetadata,
    /// Where the augmented table was written.
    pub output: PathBuf,
    /// SHA-256 of the written file.
    pub sha256: String,
    pub stats: CircularStats,
}

/// Circularize an in-memory table.
///
/// Output row order: the unrotated 2-, 3-, and 4-choice buckets, then all
/// shift-1 variants (2c, 3c, 4c), all shift-2 variants (3c, 4c), and the
/// shift-3 variants (4c). Within a bucket, demoted rows precede the bucket's
/// native rows, each group in input order.
pub fn circularize_table(table: QuestionTable) -> (QuestionTable, CircularStats) {
    let headers = table.headers.clone();
    let max_index = table.rows.iter().map(|r| r.index).max().unwrap_or(0);
    let offset = compute_offset(max_index);

    let Buckets { two, three, four } = bucketize(table.rows);

    // Demotions cascade strictly downward: resolve 4→3 first, then re-test
    // the merged pool for 3→2.
    let (four, demoted) = split_rotatable(four, 4);
    let mut pool = demoted;
    pool.extend(three);
    let (three, demoted) = split_rotatable(pool, 3);
    let mut two_merged = demoted;
    two_merged.extend(two);
    // 2-choice rows are always rotatable; there is nothing to demote into.
    let two = two_merged;

    let originals = two.len() + three.len() + four.len();
    let buckets = BucketCounts {
        two: two.len(),
        three: three.len(),
        four: four.len(),
    };

    let mut rows = Vec::with_capacity(originals * 4);
    rows.extend(two.iter().cloned());
    rows.extend(three.iter().cloned());
    rows.extend(four.iter().cloned());

    for shift in 1..=3usize {
        for (bucket, n) in [(&two, 2), (&three, 3), (&four, 4)] {
            if shift >= n {
                continue;
            }
            let map = LetterMap::cyclic(n, shift);
            rows.extend(
                bucket
                    .iter()
                    .map(|row| rotate(row, &map, offset, shift as u64)),
            );
        }
    }

    let variants = rows.len() - originals;
    let stats = CircularStats {
        offset,
        originals,
        variants,
        buckets,
    };
    (QuestionTable { headers, rows }, stats)
}

/// Circularize a `.tsv` file and write the augmented table next to it.
///
/// All preconditions (extension, populated 5th option) are checked before
/// any row is transformed; on failure nothing is written.
pub fn circularize_file(input: impl AsRef<Path>) -> Result<CircularReport> {
    let input = input.as_ref();
    let (table, source) = Parser::new().parse_file(input)?;
    let questions = QuestionTable::from_table(&table)?;

    let (augmented, stats) = circularize_table(questions);

    let output_path = circ_output_path(input);
    let sha256 = output::write_records(&output_path, &augmented.headers, &augmented.to_records())?;

    Ok(CircularReport {
        input: source,
        output: output_path,
        sha256,
        stats,
    })
}

/// `bench.tsv` → `bench_CIRC.tsv`, next to the input.
fn circ_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}{CIRC_SUFFIX}.tsv"))
}
