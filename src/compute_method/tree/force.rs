use glam::DVec2;

use super::{
    bbox::BoundingBox,
    quadtree::{Multipole, Quadrant},
    Node, NodeID, Tree, TreeBuilder,
};
use crate::{compute_method::Coulomb, particle::PointCharge};

pub(crate) trait TreeForce {
    fn force_on(
        &self,
        affected: PointCharge,
        node: Option<NodeID>,
        theta: f64,
        law: &Coulomb,
    ) -> DVec2;
}

impl TreeForce for Tree<Quadrant, PointCharge> {
    fn force_on(
        &self,
        affected: PointCharge,
        node: Option<NodeID>,
        theta: f64,
        law: &Coulomb,
    ) -> DVec2 {
        if affected.1 == 0.0 {
            return DVec2::ZERO;
        }

        let mut force = DVec2::ZERO;
        let mut stack = Vec::with_capacity(4 * (self.nodes.len() as f64).log2().max(1.0) as usize);
        stack.push(node);

        while let Some(node) = stack.pop() {
            let Some(id) = node else {
                continue;
            };
            let id = id as usize;

            let Multipole {
                positive,
                negative,
                centroid,
            } = self.data[id];

            match self.nodes[id] {
                // A node holding the affected charge is always opened so that the charge never
                // acts on itself through the node's monopoles.
                Node::Internal(Quadrant(children, bbox))
                    if bbox.contains(affected.0)
                        || bbox.width().powi(2)
                            > theta * theta * affected.0.distance_squared(centroid) =>
                {
                    stack.extend(children);
                }
                _ => {
                    force += law.force(affected, positive) + law.force(affected, negative);
                }
            }
        }

        force
    }
}

/// Builds the tree of the charged particles and returns it with its root.
pub(crate) fn build(charges: &[PointCharge]) -> (Tree<Quadrant, PointCharge>, Option<NodeID>) {
    let sources: Vec<_> = charges.iter().copied().filter(|c| c.1 != 0.0).collect();

    let bbox = BoundingBox::square_containing(sources.iter().map(|c| c.0));
    let mut tree: Tree<Quadrant, PointCharge> = Tree::with_capacity(sources.len());
    let root = tree.build_node(sources, bbox);

    (tree, root)
}
