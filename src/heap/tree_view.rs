//! Looking at a heap-ordered slice as a complete binary tree.

use std::fmt::{Display, Write};

/// Returns the number of layers a complete binary tree with `len` nodes has.
pub fn height(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

/// Returns the nodes on the `y`-th layer. Layer `y` spans indices
/// `2^y - 1 .. 2^(y+1) - 1`; the last layer may be shorter.
pub fn layer<T>(nodes: &[T], y: usize) -> &[T] {
    if y >= height(nodes.len()) {
        return &[];
    }

    let start = (1usize << y) - 1;
    let end = start.saturating_mul(2).saturating_add(1).min(nodes.len());
    &nodes[start..end]
}

/// Renders one line per layer. Siblings are separated by `", "` and
/// neighboring sibling pairs by `" | "`:
///
/// ```text
/// 100
/// 75, 98
/// 63, 62 | 55, 70
/// ```
pub fn render<T: Display>(nodes: &[T]) -> String {
    let mut text = String::new();
    for y in 0..height(nodes.len()) {
        let layer = layer(nodes, y);
        for (i, node) in layer.iter().enumerate() {
            let _ = write!(text, "{}", node);
            if i + 1 < layer.len() {
                text.push_str(if i % 2 == 1 { " | " } else { ", " });
            }
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_height() {
        assert_eq!(height(0), 0);
        assert_eq!(height(1), 1);
        assert_eq!(height(2), 2);
        assert_eq!(height(3), 2);
        assert_eq!(height(4), 3);
        assert_eq!(height(7), 3);
        assert_eq!(height(8), 4);
    }

    #[test]
    fn test_layer() {
        let nodes = [9, 8, 7, 6, 5, 4];
        assert_eq!(layer(&nodes, 0), &[9]);
        assert_eq!(layer(&nodes, 1), &[8, 7]);
        assert_eq!(layer(&nodes, 2), &[6, 5, 4]);
        assert!(layer(&nodes, 3).is_empty());
        assert!(layer::<i32>(&[], 0).is_empty());
    }

    #[test]
    fn test_render() {
        assert_eq!(render::<i32>(&[]), "");
        assert_eq!(render(&[1]), "1\n");
        assert_eq!(
            render(&[100, 75, 98, 63, 62, 55, 70, 31]),
            "100\n75, 98\n63, 62 | 55, 70\n31\n"
        );
    }
}
