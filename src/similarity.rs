/// Normalized edit-distance similarity between two strings.
///
/// Lengths and edits are counted in Unicode scalar values, so a homoglyph
/// substitution such as `pаypal` (Cyrillic `а`) costs exactly one edit.
pub struct StringSimilarity;

impl StringSimilarity {
    /// Levenshtein distance with unit cost for insertion, deletion and substitution.
    pub fn levenshtein(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        // Full (|a|+1) x (|b|+1) matrix
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
                matrix[i][j] = (matrix[i - 1][j] + 1)
                    .min(matrix[i][j - 1] + 1)
                    .min(matrix[i - 1][j - 1] + cost);
            }
        }

        matrix[a.len()][b.len()]
    }

    /// Similarity in `[0, 1]`: `(max_len - distance) / max_len`.
    ///
    /// Two empty strings are identical and score `1.0`.
    pub fn ratio(a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 1.0;
        }

        let distance = Self::levenshtein(a, b);
        (max_len - distance) as f64 / max_len as f64
    }
}
