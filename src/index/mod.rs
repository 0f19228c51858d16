//! Height-balanced (AVL) ordered index of profiles keyed by id.
//!
//! Every link owns its child outright (`Option<Box<Node>>`), so a rotation
//! moves ownership between three nodes and a delete drops exactly the node
//! it unlinks. Each mutation walks down recursively and rebalances on the
//! way back up, recomputing heights bottom child first.

use crate::error::{DbError, Result};
use crate::record::{Profile, ProfileId};
use std::cmp::Ordering;
use std::mem;
use tracing::{debug, trace};

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    profile: Profile,
    /// Height of the subtree rooted here; a leaf has height 1
    height: u32,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(profile: Profile) -> Box<Self> {
        Box::new(Self {
            profile,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn id(&self) -> ProfileId {
        self.profile.id
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }
}

fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor(link: &Link) -> i64 {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

/// Rotate `y` right around its left child, returning the new subtree root.
///
/// The left child must be present; the balance checks at every call site
/// guarantee it.
fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        debug_assert!(false, "rotate_right without a left child");
        return y;
    };
    trace!(pivot = y.id(), new_root = x.id(), "rotate right");
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Rotate `x` left around its right child, returning the new subtree root.
fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        debug_assert!(false, "rotate_left without a right child");
        return x;
    };
    trace!(pivot = x.id(), new_root = y.id(), "rotate left");
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Insert `profile` below `link`.
///
/// Returns the new subtree root, plus the profile handed back when its id
/// is already taken (in which case the subtree is unchanged).
fn insert_node(link: Link, profile: Profile) -> (Box<Node>, Option<Profile>) {
    let Some(mut node) = link else {
        return (Node::leaf(profile), None);
    };

    let id = profile.id;
    let rejected = match id.cmp(&node.id()) {
        Ordering::Less => {
            let (child, rejected) = insert_node(node.left.take(), profile);
            node.left = Some(child);
            rejected
        }
        Ordering::Greater => {
            let (child, rejected) = insert_node(node.right.take(), profile);
            node.right = Some(child);
            rejected
        }
        Ordering::Equal => return (node, Some(profile)),
    };
    if rejected.is_some() {
        return (node, rejected);
    }

    node.update_height();
    (rebalance_after_insert(node, id), None)
}

/// Restore balance at `node` after `id` was inserted somewhere below it.
///
/// The inserted key, compared against the heavy child's key, tells a
/// straight (LL/RR) imbalance from a zig-zag (LR/RL) one.
fn rebalance_after_insert(mut node: Box<Node>, id: ProfileId) -> Box<Node> {
    let balance = node.balance_factor();

    if balance > 1 {
        if let Some(left_id) = node.left.as_ref().map(|left| left.id()) {
            if id < left_id {
                return rotate_right(node);
            }
            if id > left_id {
                node.left = node.left.take().map(rotate_left);
                return rotate_right(node);
            }
        }
    } else if balance < -1 {
        if let Some(right_id) = node.right.as_ref().map(|right| right.id()) {
            if id > right_id {
                return rotate_left(node);
            }
            if id < right_id {
                node.right = node.right.take().map(rotate_right);
                return rotate_left(node);
            }
        }
    }

    node
}

/// Remove `id` from below `link`.
///
/// Returns the new subtree root and the removed profile, if any.
fn delete_node(link: Link, id: ProfileId) -> (Link, Option<Profile>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match id.cmp(&node.id()) {
        Ordering::Less => {
            let (child, removed) = delete_node(node.left.take(), id);
            node.left = child;
            removed
        }
        Ordering::Greater => {
            let (child, removed) = delete_node(node.right.take(), id);
            node.right = child;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => {
                let Node { profile, .. } = *node;
                return (None, Some(profile));
            }
            (Some(child), None) | (None, Some(child)) => {
                // The surviving child is already balanced; ancestors fix
                // their own heights as the recursion unwinds.
                let Node { profile, .. } = *node;
                return (Some(child), Some(profile));
            }
            (Some(left), Some(right)) => {
                // Promote the in-order successor: unlink its node from the
                // right subtree and move its record into this one.
                let successor_id = min_id(&right);
                let (right, successor) = delete_node(Some(right), successor_id);
                node.left = Some(left);
                node.right = right;
                successor.map(|successor| mem::replace(&mut node.profile, successor))
            }
        },
    };
    if removed.is_none() {
        return (Some(node), None);
    }

    node.update_height();
    (Some(rebalance_after_delete(node)), removed)
}

/// Restore balance at `node` after a removal below it.
///
/// The removed key is gone, so the case is read off the heavy child's own
/// balance factor instead.
fn rebalance_after_delete(mut node: Box<Node>) -> Box<Node> {
    let balance = node.balance_factor();

    if balance > 1 {
        if balance_factor(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if balance_factor(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn min_id(node: &Node) -> ProfileId {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current.id()
}

/// Check every invariant below `node`, returning its true height and size
fn verify_subtree(
    node: Option<&Node>,
    lower: Option<ProfileId>,
    upper: Option<ProfileId>,
) -> Result<(u32, usize)> {
    let Some(node) = node else {
        return Ok((0, 0));
    };
    let id = node.id();

    if lower.is_some_and(|lower| id <= lower) || upper.is_some_and(|upper| id >= upper) {
        return Err(DbError::InvariantViolation(format!(
            "id {} out of order (bounds {:?}..{:?})",
            id, lower, upper
        )));
    }

    let (left_height, left_count) = verify_subtree(node.left.as_deref(), lower, Some(id))?;
    let (right_height, right_count) = verify_subtree(node.right.as_deref(), Some(id), upper)?;

    let expected = 1 + left_height.max(right_height);
    if node.height != expected {
        return Err(DbError::InvariantViolation(format!(
            "id {} stores height {} but its subtree has height {}",
            id, node.height, expected
        )));
    }
    if left_height.abs_diff(right_height) > 1 {
        return Err(DbError::InvariantViolation(format!(
            "id {} has child heights {} and {}",
            id, left_height, right_height
        )));
    }

    Ok((expected, 1 + left_count + right_count))
}

/// Order in which [`BalancedIndex::traverse`] visits records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree
    PreOrder,
    /// Left subtree, then node, then right subtree (ascending ids)
    InOrder,
    /// Left subtree, then right subtree, then node
    PostOrder,
}

#[derive(Debug, Clone, Copy)]
enum Step<'a> {
    Expand(&'a Node),
    Yield(&'a Node),
}

/// Lazy walk over every record of an index.
///
/// The walk borrows the index, so the tree cannot change underneath it.
/// Cloning a traversal gives an independent cursor at the same position.
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    order: TraversalOrder,
    stack: Vec<Step<'a>>,
    remaining: usize,
}

impl<'a> Traversal<'a> {
    fn new(root: Option<&'a Node>, len: usize, order: TraversalOrder) -> Self {
        Self {
            order,
            stack: root.map(Step::Expand).into_iter().collect(),
            remaining: len,
        }
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    /// Push the three parts of `node` in reverse of the order they are emitted
    fn expand(&mut self, node: &'a Node) {
        let left = node.left.as_deref().map(Step::Expand);
        let right = node.right.as_deref().map(Step::Expand);
        match self.order {
            TraversalOrder::PreOrder => {
                self.stack.extend(right);
                self.stack.extend(left);
                self.stack.push(Step::Yield(node));
            }
            TraversalOrder::InOrder => {
                self.stack.extend(right);
                self.stack.push(Step::Yield(node));
                self.stack.extend(left);
            }
            TraversalOrder::PostOrder => {
                self.stack.push(Step::Yield(node));
                self.stack.extend(right);
                self.stack.extend(left);
            }
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Profile;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            match step {
                Step::Expand(node) => self.expand(node),
                Step::Yield(node) => {
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some(&node.profile);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Traversal<'_> {}

/// Ordered, uniquely keyed collection of profiles.
///
/// Lookups, inserts and deletes are O(log n): after every mutation each
/// node's children differ in height by at most one.
///
/// # Example
///
/// ```
/// use profiledb::{BalancedIndex, Profile, Sex, TraversalOrder};
///
/// let mut index = BalancedIndex::new();
/// for id in [10, 20, 30] {
///     index.insert(Profile::new(id, "Ann", 30, Sex::Female, "555-0100")).unwrap();
/// }
/// assert_eq!(index.height(), 2);
///
/// index.delete(10);
/// assert!(index.search(10).is_none());
///
/// let ids: Vec<_> = index.traverse(TraversalOrder::InOrder).map(|p| p.id).collect();
/// assert_eq!(ids, vec![20, 30]);
/// ```
#[derive(Debug, Default)]
pub struct BalancedIndex {
    root: Link,
    len: usize,
}

impl BalancedIndex {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of stored profiles
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the whole tree; 0 when empty
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Insert a new profile.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if a profile with the same id is already
    /// stored. The stored profile and the size are left untouched.
    pub fn insert(&mut self, profile: Profile) -> Result<()> {
        let id = profile.id;
        let (root, rejected) = insert_node(self.root.take(), profile);
        self.root = Some(root);

        if rejected.is_some() {
            debug!(id, "insert rejected, id already present");
            return Err(DbError::DuplicateKey { id });
        }
        self.len += 1;
        debug!(id, len = self.len, height = self.height(), "profile inserted");
        Ok(())
    }

    /// Remove the profile stored under `id` and return it.
    ///
    /// Deleting an id that is not present is a no-op and returns `None`.
    pub fn delete(&mut self, id: ProfileId) -> Option<Profile> {
        let (root, removed) = delete_node(self.root.take(), id);
        self.root = root;

        match removed {
            Some(profile) => {
                self.len -= 1;
                debug!(id, len = self.len, height = self.height(), "profile deleted");
                Some(profile)
            }
            None => {
                debug!(id, "delete of missing id ignored");
                None
            }
        }
    }

    /// Look up the profile stored under `id`
    pub fn search(&self, id: ProfileId) -> Option<&Profile> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match id.cmp(&node.id()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.profile),
            };
        }
        None
    }

    pub fn contains(&self, id: ProfileId) -> bool {
        self.search(id).is_some()
    }

    /// Walk every profile once in the given order
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        Traversal::new(self.root.as_deref(), self.len, order)
    }

    /// Profiles in ascending id order
    pub fn iter(&self) -> Traversal<'_> {
        self.traverse(TraversalOrder::InOrder)
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Check ordering, stored heights, balance, and the cached size.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the first breach found.
    pub fn verify(&self) -> Result<()> {
        let (_, count) = verify_subtree(self.root.as_deref(), None, None)?;
        if count != self.len {
            return Err(DbError::InvariantViolation(format!(
                "tree holds {} nodes but len is {}",
                count, self.len
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a BalancedIndex {
    type Item = &'a Profile;
    type IntoIter = Traversal<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
