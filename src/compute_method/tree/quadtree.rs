use glam::DVec2;

use super::{bbox::BoundingBox, Node, NodeID, Tree, TreeBuilder, TreeData};
use crate::particle::PointCharge;

/// Children of an internal node and its square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Quadrant(pub [Option<NodeID>; 4], pub BoundingBox);

/// Aggregated charge of a node.
///
/// Positive and negative charges are summed separately: a single signed monopole has no usable
/// centre once the charges of a node nearly cancel out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Multipole {
    pub(crate) positive: PointCharge,
    pub(crate) negative: PointCharge,
    /// Centre weighted by the charge magnitudes, used for the opening criterion.
    pub(crate) centroid: DVec2,
}

fn monopole<'a>(charges: impl Iterator<Item = &'a PointCharge> + Clone) -> PointCharge {
    let total: f64 = charges.clone().map(|c| c.1).sum();
    if total == 0.0 {
        return (DVec2::ZERO, 0.0);
    }

    let center = charges.map(|c| c.0 * (c.1 / total)).sum();
    (center, total)
}

impl TreeData for PointCharge {
    type Output = Multipole;

    fn compute_data(data: &[Self]) -> Multipole {
        let positive = monopole(data.iter().filter(|c| c.1 > 0.0));
        let negative = monopole(data.iter().filter(|c| c.1 < 0.0));

        let magnitude = positive.1 - negative.1;
        let centroid = if magnitude == 0.0 {
            data.iter().map(|c| c.0).sum::<DVec2>() / data.len() as f64
        } else {
            (positive.0 * positive.1 - negative.0 * negative.1) / magnitude
        };

        Multipole {
            positive,
            negative,
            centroid,
        }
    }
}

impl TreeBuilder<BoundingBox, PointCharge> for Tree<Quadrant, PointCharge> {
    fn build_node(&mut self, data: Vec<PointCharge>, bbox: BoundingBox) -> Option<NodeID> {
        if data.is_empty() {
            return None;
        }

        let id = self.nodes.len();
        self.nodes.push(Node::External);
        self.data.push(PointCharge::compute_data(&data));

        if bbox.is_divisible() && data.windows(2).any(|c| c[0].0 != c[1].0) {
            let mut quadrants: [Vec<PointCharge>; 4] = Default::default();

            for c in data {
                quadrants[bbox.quadrant_of(c.0)].push(c);
            }

            let [ne, nw, se, sw] = quadrants;
            let [nebb, nwbb, sebb, swbb] = bbox.subdivide();

            self.nodes[id] = Node::Internal(Quadrant(
                [
                    self.build_node(ne, nebb),
                    self.build_node(nw, nwbb),
                    self.build_node(se, sebb),
                    self.build_node(sw, swbb),
                ],
                bbox,
            ));
        }

        Some(id as NodeID)
    }
}
