/// A `|`-delimited table line.
pub struct PipeTable;

impl PipeTable {
    pub const PIPE: char = '|';

    pub fn is_row(trimmed: &str) -> bool {
        trimmed.starts_with(Self::PIPE)
    }

    /// Strips every leading/trailing pipe, splits on the rest and trims cells.
    pub fn cells(trimmed: &str) -> Vec<&str> {
        trimmed
            .trim_matches(Self::PIPE)
            .split(Self::PIPE)
            .map(str::trim)
            .collect()
    }

    /// A separator row has only `-`, `:` and spaces in every cell.
    pub fn is_separator(cells: &[&str]) -> bool {
        cells
            .iter()
            .all(|cell| cell.chars().all(|c| matches!(c, '-' | ':' | ' ')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_trimmed() {
        assert_eq!(PipeTable::cells("| a | bb |"), vec!["a", "bb"]);
    }

    #[test]
    fn missing_outer_pipes_still_split() {
        assert_eq!(PipeTable::cells("| ccc | d | e"), vec!["ccc", "d", "e"]);
    }

    #[test]
    fn empty_inner_cells_are_kept() {
        assert_eq!(PipeTable::cells("| a || c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn separator_rows() {
        assert!(PipeTable::is_separator(&PipeTable::cells("|---|:---:|")));
        assert!(PipeTable::is_separator(&PipeTable::cells("| --- | --- |")));
        assert!(!PipeTable::is_separator(&PipeTable::cells("| a | --- |")));
    }
}
