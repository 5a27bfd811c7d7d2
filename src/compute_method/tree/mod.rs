pub(crate) mod bbox;
pub(crate) mod force;
pub(crate) mod quadtree;

pub(crate) type NodeID = u32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Node<N> {
    Internal(N),
    External,
}

/// Flat tree: `data[i]` holds the aggregated data of `nodes[i]`.
pub(crate) struct Tree<N, D>
where
    D: TreeData,
{
    pub(crate) nodes: Vec<Node<N>>,
    pub(crate) data: Vec<D::Output>,
}

pub(crate) trait TreeData: Sized {
    type Output;

    fn compute_data(data: &[Self]) -> Self::Output;
}

pub(crate) trait TreeBuilder<B, D> {
    fn build_node(&mut self, data: Vec<D>, bbox: B) -> Option<NodeID>;
}

impl<N, D> Tree<N, D>
where
    D: TreeData,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<N, D> Default for Tree<N, D>
where
    D: TreeData,
{
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            data: Vec::new(),
        }
    }
}
