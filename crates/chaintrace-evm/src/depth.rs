//! Nesting depth from the tracer's tree-drawing glyphs.

/// `│` vertical bar, `├` branch, `└` corner. The horizontal `─` does not count.
pub const TREE_GLYPHS: [char; 3] = ['│', '├', '└'];

/// Number of tree glyphs in an indentation prefix. 0 is the top-level call.
///
/// Depth is relative to the tracer's own rendering; consecutive lines are
/// not checked for monotonic nesting.
pub fn depth_of(prefix: &str) -> usize {
    prefix.chars().filter(|c| TREE_GLYPHS.contains(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_has_no_glyphs() {
        assert_eq!(depth_of(""), 0);
        assert_eq!(depth_of("    "), 0);
    }

    #[test]
    fn counts_each_glyph_kind() {
        assert_eq!(depth_of("├─ "), 1);
        assert_eq!(depth_of("└─ "), 1);
        assert_eq!(depth_of("│   ├─ "), 2);
        assert_eq!(depth_of("    │   │   └─ "), 3);
    }

    #[test]
    fn horizontal_bars_do_not_count() {
        assert_eq!(depth_of("──── "), 0);
    }
}
