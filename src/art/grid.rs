//! The binary target grid and the art-text parser.

use super::DensityMap;

/// Default width for art with no rows and no width override.
const FALLBACK_WIDTH: usize = 80;

/// The binary target grid derived from an art image.
///
/// Row-major; a set cell wants a visible character, a clear cell wants a
/// space. Out-of-range lookups read as background, so callers can probe
/// past the right edge without bounds juggling.
#[derive(Debug, Clone)]
pub struct ArtGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl ArtGrid {
    /// Create an all-background grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut grid = Self::new(width, height);
        for row in 0..height {
            for col in 0..width {
                grid.set(row, col, f(row, col));
            }
        }
        grid
    }

    /// Width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at (row, col) is foreground. Out of range is
    /// background.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        self.cells[row * self.width + col]
    }

    /// Set a cell. Out-of-range writes are dropped.
    pub fn set(&mut self, row: usize, col: usize, foreground: bool) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = foreground;
        }
    }

    /// Number of foreground cells.
    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Decode UTF-8, skipping malformed byte sequences instead of replacing
/// them.
pub fn decode_utf8_skip(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                out.push_str(s);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                if let Ok(s) = std::str::from_utf8(valid) {
                    out.push_str(s);
                }
                let skip = e.error_len().unwrap_or(after.len());
                rest = &after[skip..];
            }
        }
    }
    out
}

/// Parse art text into a binary target grid.
///
/// Rows split on `\n`; when the text ends with a newline and neither
/// dimension is overridden, the trailing empty row is dropped. Height
/// defaults to the number of rows, width to the longest row in characters.
/// Overrides truncate or pad with background. Short rows pad with
/// background on the right; long rows truncate.
pub fn parse_art(
    text: &[u8],
    width_override: Option<usize>,
    height_override: Option<usize>,
    map: &DensityMap,
) -> ArtGrid {
    let decoded = decode_utf8_skip(text);
    let mut lines: Vec<&str> = decoded.split('\n').collect();
    if width_override.is_none() && height_override.is_none() && decoded.ends_with('\n') {
        lines.pop();
    }

    let height = match height_override {
        Some(h) => {
            lines.truncate(h);
            h
        }
        None => lines.len(),
    };

    let width = match width_override {
        Some(w) => w,
        None => {
            let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            if height == 0 {
                FALLBACK_WIDTH
            } else {
                longest
            }
        }
    };

    let mut grid = ArtGrid::new(width, height);
    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().take(width).enumerate() {
            grid.set(row, col, map.char_is_foreground(ch));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> ArtGrid {
        parse_art(text.as_bytes(), None, None, &DensityMap::binary())
    }

    #[test]
    fn test_parse_simple() {
        let g = grid("#.\n.#");
        assert_eq!((g.width(), g.height()), (2, 2));
        assert!(g.get(0, 0));
        assert!(g.get(0, 1)); // '.' is foreground by default
        assert!(g.get(1, 0));
    }

    #[test]
    fn test_parse_spaces_are_background() {
        let g = grid("# #");
        assert!(g.get(0, 0));
        assert!(!g.get(0, 1));
        assert!(g.get(0, 2));
    }

    #[test]
    fn test_parse_trailing_newline_dropped() {
        let g = grid("##\n##\n");
        assert_eq!(g.height(), 2);
    }

    #[test]
    fn test_parse_trailing_newline_kept_with_override() {
        let g = parse_art(b"##\n##\n", None, Some(3), &DensityMap::binary());
        assert_eq!(g.height(), 3);
        assert!(!g.get(2, 0));
    }

    #[test]
    fn test_parse_ragged_rows_pad_to_widest() {
        let g = grid("#\n###");
        assert_eq!(g.width(), 3);
        assert!(g.get(0, 0));
        assert!(!g.get(0, 1));
        assert!(g.get(1, 2));
    }

    #[test]
    fn test_parse_width_override_truncates() {
        let g = parse_art(b"#####", Some(2), None, &DensityMap::binary());
        assert_eq!(g.width(), 2);
        assert!(g.get(0, 1));
        assert!(!g.get(0, 2));
    }

    #[test]
    fn test_parse_empty_text() {
        let g = grid("");
        assert_eq!((g.width(), g.height()), (0, 1));
    }

    #[test]
    fn test_parse_zero_height_defaults_width() {
        let g = parse_art(b"", None, Some(0), &DensityMap::binary());
        assert_eq!((g.width(), g.height()), (80, 0));
    }

    #[test]
    fn test_parse_non_ascii_is_foreground() {
        let g = grid("█ █");
        assert!(g.get(0, 0));
        assert!(!g.get(0, 1));
        assert!(g.get(0, 2));
    }

    #[test]
    fn test_parse_skips_malformed_bytes() {
        let g = parse_art(b"#\xFF#", None, None, &DensityMap::binary());
        assert_eq!(g.width(), 2);
        assert!(g.get(0, 0));
        assert!(g.get(0, 1));
    }

    #[test]
    fn test_out_of_range_reads_background() {
        let g = grid("#");
        assert!(!g.get(0, 5));
        assert!(!g.get(5, 0));
    }

    #[test]
    fn test_decode_utf8_skip() {
        assert_eq!(decode_utf8_skip(b"ab\xFF\xFEcd"), "abcd");
        assert_eq!(decode_utf8_skip("héllo".as_bytes()), "héllo");
    }
}
