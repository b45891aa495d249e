//! Grid renderer: draws a [`Shape`] as text with `/` and `\` connectors.
//!
//! Rows are laid out from the deepest level up to the root, each level holding half
//! as many cells as the one below it, then reversed so the root comes first.

use tracing::{instrument, trace};

use crate::domain::shape::{Shape, Slot};

/// Output for a tree without nodes.
pub const EMPTY_TREE: &str = "<empty tree>";

const MIN_CELL_WIDTH: usize = 3;

pub struct TreeRenderer;

impl TreeRenderer {
    /// Renders the shape, root row first.
    #[instrument(level = "debug", skip_all, fields(depth = shape.depth()))]
    pub fn render(shape: &Shape) -> Vec<String> {
        if shape.is_empty() {
            return vec![EMPTY_TREE.to_string()];
        }
        let mut rows = format_grid(shape);
        trim_rows_left(&mut rows);
        rows
    }
}

/// Longest value, at least 3, rounded up to an odd number so values centre evenly.
pub fn cell_width(shape: &Shape) -> usize {
    let width = shape.max_value_width().max(MIN_CELL_WIDTH);
    width | 1
}

fn blanks(row: &mut String, count: usize) {
    row.extend(std::iter::repeat(' ').take(count));
}

fn format_grid(shape: &Shape) -> Vec<String> {
    let width = cell_width(shape);
    let mut rows = Vec::new();
    let mut left_pad = 0;

    for (r, level) in shape.levels().iter().rev().enumerate() {
        // also the number of connector rows up to the next level
        let space = (1usize << r) * (width + 1) / 2 - 1;
        trace!(depth = shape.depth() - r - 1, space, left_pad, "formatting level");

        let mut row = String::new();
        for (c, slot) in level.iter().enumerate() {
            blanks(&mut row, if c == 0 { left_pad } else { 2 * left_pad + 1 });
            match slot {
                Slot::Present(value) => {
                    let padding = width - value.chars().count();
                    let short = padding / 2;
                    let long = padding - short;
                    let (before, after) = if c % 2 == 1 { (short, long) } else { (long, short) };
                    blanks(&mut row, before);
                    row.push_str(value);
                    blanks(&mut row, after);
                }
                Slot::Absent => blanks(&mut row, width),
            }
        }
        rows.push(row);

        if level.len() == 1 {
            break;
        }

        for i in 0..space {
            let left_space = space + 1 + i;
            let right_space = space - 1 - i;
            let mut row = String::new();
            for (c, slot) in level.iter().enumerate() {
                if c % 2 == 0 {
                    blanks(&mut row, if c == 0 { left_space } else { 2 * left_space + 1 });
                    row.push(if slot.is_present() { '/' } else { ' ' });
                    blanks(&mut row, right_space + 1);
                } else {
                    blanks(&mut row, right_space);
                    row.push(if slot.is_present() { '\\' } else { ' ' });
                }
            }
            rows.push(row);
        }

        left_pad += space + 1;
    }

    rows.reverse();
    rows
}

/// Removes the margin shared by every row, so the leftmost character lands in column 0.
pub fn trim_rows_left(rows: &mut [String]) {
    let margin = rows
        .iter()
        .map(|row| row.len() - row.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);
    if margin == 0 {
        return;
    }
    for row in rows.iter_mut() {
        row.drain(..margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::AvlTree;

    fn shape_with(values: &[&str]) -> Shape {
        Shape::from_levels(vec![values
            .iter()
            .map(|v| Slot::Present(v.to_string()))
            .collect()])
    }

    #[test]
    fn cell_width_is_odd_and_at_least_three() {
        assert_eq!(cell_width(&shape_with(&["1"])), 3);
        assert_eq!(cell_width(&shape_with(&["1234"])), 5);
        assert_eq!(cell_width(&shape_with(&["12345"])), 5);
        assert_eq!(cell_width(&shape_with(&["123456"])), 7);
    }

    #[test]
    fn trim_uses_smallest_margin_of_all_rows() {
        let mut rows = vec!["   a".to_string(), "  b".to_string(), "    c".to_string()];
        trim_rows_left(&mut rows);
        assert_eq!(rows, vec![" a", "b", "  c"]);
    }

    #[test]
    fn unindented_row_leaves_rows_untouched() {
        let mut rows = vec!["x".to_string(), "   y".to_string()];
        trim_rows_left(&mut rows);
        assert_eq!(rows, vec!["x", "   y"]);
    }

    #[test]
    fn blank_row_counts_its_full_length() {
        let mut rows = vec!["    a".to_string(), "  ".to_string()];
        trim_rows_left(&mut rows);
        assert_eq!(rows, vec!["  a", ""]);
    }

    #[test]
    fn single_node_is_centred() {
        let tree: AvlTree<i32> = [7].into_iter().collect();
        assert_eq!(TreeRenderer::render(&Shape::of(&tree)), vec!["7 "]);
    }

    #[test]
    fn missing_right_child_leaves_blank_cell() {
        let tree: AvlTree<i32> = [2, 1].into_iter().collect();
        assert_eq!(
            TreeRenderer::render(&Shape::of(&tree)),
            vec!["  2 ", " /  ", "1     "]
        );
    }

    #[test]
    fn empty_shape_renders_sentinel() {
        assert_eq!(TreeRenderer::render(&Shape::default()), vec![EMPTY_TREE]);
    }
}
