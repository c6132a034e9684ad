//! Geometry accumulation
//!
//! Absolute positions are computed by walking an element's offset-parent chain
//! and summing each level's offset, the same way the browser reports
//! `offsetTop`/`offsetLeft` relative to the nearest positioned ancestor.

/// A node that reports its offset relative to a positioning ancestor
pub trait OffsetNode: Sized {
    /// Distance from the top edge of the offset parent, in pixels
    fn offset_top(&self) -> f64;

    /// Distance from the left edge of the offset parent, in pixels
    fn offset_left(&self) -> f64;

    /// The positioning ancestor, `None` at the root
    fn offset_parent(&self) -> Option<Self>;
}

/// Absolute top position of `node` within the rendering surface.
///
/// An absent node yields 0.
pub fn absolute_top<N: OffsetNode + Clone>(node: Option<&N>) -> f64 {
    accumulate(node, N::offset_top)
}

/// Absolute left position of `node` within the rendering surface.
///
/// An absent node yields 0.
pub fn absolute_left<N: OffsetNode + Clone>(node: Option<&N>) -> f64 {
    accumulate(node, N::offset_left)
}

fn accumulate<N, F>(node: Option<&N>, offset: F) -> f64
where
    N: OffsetNode + Clone,
    F: Fn(&N) -> f64,
{
    let mut total = 0.0;
    let mut current = node.cloned();

    while let Some(element) = current {
        total += offset(&element);
        current = element.offset_parent();
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    /// Simple linked chain of offsets for testing
    #[derive(Clone)]
    struct Node {
        top: f64,
        left: f64,
        parent: Option<Rc<Node>>,
    }

    impl OffsetNode for Node {
        fn offset_top(&self) -> f64 {
            self.top
        }

        fn offset_left(&self) -> f64 {
            self.left
        }

        fn offset_parent(&self) -> Option<Self> {
            self.parent.as_deref().cloned()
        }
    }

    fn chain(offsets: &[(f64, f64)]) -> Option<Node> {
        offsets.iter().rev().fold(None, |parent, &(top, left)| {
            Some(Node {
                top,
                left,
                parent: parent.map(Rc::new),
            })
        })
    }

    #[test]
    fn test_absent_node_is_zero() {
        assert_eq!(absolute_top::<Node>(None), 0.0);
        assert_eq!(absolute_left::<Node>(None), 0.0);
    }

    #[test]
    fn test_single_node_reports_own_offset() {
        let node = chain(&[(12.0, 7.0)]).unwrap();
        assert_eq!(absolute_top(Some(&node)), 12.0);
        assert_eq!(absolute_left(Some(&node)), 7.0);
    }

    #[test]
    fn test_sums_every_level_of_the_chain() {
        let node = chain(&[(10.0, 1.0), (20.0, 2.0), (300.0, 30.0), (4.5, 0.5)]).unwrap();
        assert_eq!(absolute_top(Some(&node)), 334.5);
        assert_eq!(absolute_left(Some(&node)), 33.5);
    }

    #[test]
    fn test_accumulator_is_offset_plus_parent() {
        let node = chain(&[(3.0, 4.0), (5.0, 6.0), (7.0, 8.0)]).unwrap();
        let parent = node.offset_parent();
        assert_eq!(
            absolute_top(Some(&node)),
            node.offset_top() + absolute_top(parent.as_ref())
        );
        assert_eq!(
            absolute_left(Some(&node)),
            node.offset_left() + absolute_left(parent.as_ref())
        );
    }
}
