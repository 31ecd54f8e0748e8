//! Fuzzy matching utilities for search
//!
//! Word-level Levenshtein distance. Inputs are single normalized tokens,
//! never whole fields: the table is O(len(a) * len(b)).

/// Levenshtein edit distance between two words
///
/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`. Case-sensitive, compared per `char`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let delete = matrix[i - 1][j] + 1;
            let insert = matrix[i][j - 1] + 1;
            let substitute = matrix[i - 1][j - 1] + cost;
            matrix[i][j] = delete.min(insert).min(substitute);
        }
    }

    matrix[a.len()][b.len()]
}

/// `edit_distance(a, b)` when it is at most `max`, otherwise `None`
///
/// Skips the table when the length difference alone already exceeds `max`.
pub fn bounded_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a.abs_diff(len_b) > max {
        return None;
    }
    let distance = edit_distance(a, b);
    (distance <= max).then_some(distance)
}
