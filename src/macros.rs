/// Construct an [`RbTree`] ordered by [`NaturalOrder`] by inserting the
/// given keys in order.
///
/// ```
/// let tree = redblack::rbtree![5, 3, 8, 3];
/// assert_eq!(tree.to_vec(), [3, 3, 5, 8]);
/// ```
///
/// [`RbTree`]: crate::RbTree
/// [`NaturalOrder`]: crate::NaturalOrder
#[macro_export]
macro_rules! rbtree {
    () => {
        $crate::RbTree::new()
    };
    ($($key:expr),+ $(,)?) => {{
        let mut tree = $crate::RbTree::new();
        $( tree.insert($key); )+
        tree
    }};
}
