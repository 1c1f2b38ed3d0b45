//! Whole-tree walks. Children are always visited in [`Quadrant::ALL`](super::Quadrant::ALL) order.

use super::Quadtree;

/// Visit `node`, then each of its descendants.
pub fn pre_order<T, S, F>(node: &Quadtree<T, S>, mut f: F)
where
    F: FnMut(&Quadtree<T, S>),
{
    pre_order_impl(node, &mut f);
}

fn pre_order_impl<T, S, F>(node: &Quadtree<T, S>, f: &mut F)
where
    F: FnMut(&Quadtree<T, S>),
{
    f(node);
    if let Some(ref children) = node.children {
        for child in children.iter() {
            pre_order_impl(child, f);
        }
    }
}

/// Visit the descendants of `node`, then `node` itself.
pub fn post_order<T, S, F>(node: &Quadtree<T, S>, mut f: F)
where
    F: FnMut(&Quadtree<T, S>),
{
    post_order_impl(node, &mut f);
}

fn post_order_impl<T, S, F>(node: &Quadtree<T, S>, f: &mut F)
where
    F: FnMut(&Quadtree<T, S>),
{
    if let Some(ref children) = node.children {
        for child in children.iter() {
            post_order_impl(child, f);
        }
    }
    f(node);
}

/// [`pre_order`] with mutable access, e.g. to attach state to every node.
pub fn pre_order_mut<T, S, F>(node: &mut Quadtree<T, S>, mut f: F)
where
    F: FnMut(&mut Quadtree<T, S>),
{
    pre_order_mut_impl(node, &mut f);
}

fn pre_order_mut_impl<T, S, F>(node: &mut Quadtree<T, S>, f: &mut F)
where
    F: FnMut(&mut Quadtree<T, S>),
{
    f(node);
    if let Some(children) = node.children.as_mut() {
        for child in children.iter_mut() {
            pre_order_mut_impl(child, f);
        }
    }
}

/// [`post_order`] with mutable access. By the time a node is visited, the state of its children
/// is final, which makes it the walk for bottom-up aggregates.
pub fn post_order_mut<T, S, F>(node: &mut Quadtree<T, S>, mut f: F)
where
    F: FnMut(&mut Quadtree<T, S>),
{
    post_order_mut_impl(node, &mut f);
}

fn post_order_mut_impl<T, S, F>(node: &mut Quadtree<T, S>, f: &mut F)
where
    F: FnMut(&mut Quadtree<T, S>),
{
    if let Some(children) = node.children.as_mut() {
        for child in children.iter_mut() {
            post_order_mut_impl(child, f);
        }
    }
    f(node);
}
