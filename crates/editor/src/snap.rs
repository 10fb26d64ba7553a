//! Alignment snapping against sibling nodes.
//!
//! While a node is dragged, its edges and center are compared with those of
//! every sibling under the same parent. On each axis the closest pair within
//! the threshold pulls the node towards alignment and shows a guide line.
//!
//! All comparisons happen in the parent's layout space. Guide positions are
//! reported in world space.

use crate::settings::SnapFalloff;
use glam::Vec2;
use layout::{Bounds, LayoutTree, NodeId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use strum_macros::Display;

/// Frame motion above `threshold * FAST_DRAG_FACTOR` disables snapping for
/// that step.
pub const FAST_DRAG_FACTOR: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// A line showing an active alignment on one axis.
///
/// An X guide is a vertical line at world `x == position`; a Y guide is a
/// horizontal line at world `y == position`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    pub axis: Axis,
    pub position: f32,
    pub visible: bool,
}

pub type SnapGuides = SmallVec<[SnapGuide; 2]>;

#[derive(Clone, Debug, PartialEq)]
pub struct SnapResult {
    pub position: Vec2,
    pub guides: SnapGuides,
    /// True when the frame moved too fast for snapping to engage.
    pub suppressed: bool,
}

impl SnapResult {
    fn unmodified(position: Vec2) -> Self {
        Self {
            position,
            guides: SnapGuides::new(),
            suppressed: false,
        }
    }
}

impl SnapFalloff {
    /// Fraction of the best delta applied at `distance`.
    pub fn pull_strength(&self, distance: f32, threshold: f32) -> f32 {
        match self {
            SnapFalloff::Hard => 1.0,
            SnapFalloff::Linear if threshold <= 0.0 => 1.0,
            SnapFalloff::Linear => (1.0 - distance / threshold).clamp(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct AxisMatch {
    distance: f32,
    /// other - own
    delta: f32,
    /// The sibling coordinate being aligned to.
    target: f32,
}

/// Edges and center of a rectangle on one axis.
fn extents(bounds: &Bounds, axis: Axis) -> [f32; 3] {
    let i = axis.index();
    [bounds.min[i], bounds.max[i], bounds.center()[i]]
}

/// Compare the five alignment pairs on one axis, keeping the closest match
/// within `threshold`. Ties keep the earlier match.
fn match_axis(own: [f32; 3], other: [f32; 3], threshold: f32, best: &mut Option<AxisMatch>) {
    let [own_min, own_max, own_center] = own;
    let [other_min, other_max, other_center] = other;
    let pairs = [
        (own_min, other_min),
        (own_max, other_max),
        (own_center, other_center),
        (own_min, other_max),
        (own_max, other_min),
    ];

    for (from, to) in pairs {
        let distance = (to - from).abs();
        if distance > threshold {
            continue;
        }
        if best.is_some_and(|best| distance >= best.distance) {
            continue;
        }
        *best = Some(AxisMatch {
            distance,
            delta: to - from,
            target: to,
        });
    }
}

#[derive(Clone, Debug)]
struct CachedSibling {
    id: NodeId,
    revision: u64,
    bounds: Bounds,
}

#[derive(Debug, Default)]
struct SiblingEntry {
    /// `(structure revision, parent chain revision)` the entry was built at.
    stamp: Option<(u64, u64)>,
    siblings: Vec<CachedSibling>,
}

/// Per-parent cache of child rectangles in the parent's layout space.
///
/// An entry is rebuilt when the tree structure or anything on the parent's
/// ancestor chain changed. Otherwise only children whose own revision moved
/// are recomputed.
#[derive(Debug, Default)]
pub struct SiblingCache {
    entries: HashMap<NodeId, SiblingEntry>,
    rebuilds: u64,
}

impl SiblingCache {
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// How many times an entry was rebuilt from scratch.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    fn siblings(&mut self, tree: &LayoutTree, parent: NodeId) -> &[CachedSibling] {
        let stamp = (tree.structure_revision(), tree.chain_revision(parent));
        let entry = self.entries.entry(parent).or_default();

        if entry.stamp != Some(stamp) {
            entry.siblings = tree
                .children_of(parent)
                .iter()
                .filter_map(|&id| {
                    Some(CachedSibling {
                        id,
                        revision: tree.get(id)?.revision(),
                        bounds: tree.local_bounds(id)?,
                    })
                })
                .collect();
            entry.stamp = Some(stamp);
            self.rebuilds += 1;
            tracing::trace!(?parent, count = entry.siblings.len(), "sibling cache rebuilt");
        } else {
            for sibling in &mut entry.siblings {
                let Some(node) = tree.get(sibling.id) else {
                    continue;
                };
                if node.revision() != sibling.revision {
                    sibling.revision = node.revision();
                    if let Some(bounds) = tree.local_bounds(sibling.id) {
                        sibling.bounds = bounds;
                    }
                }
            }
        }
        &entry.siblings
    }
}

#[derive(Debug, Default)]
pub struct AlignmentSnapEngine {
    pub falloff: SnapFalloff,
    cache: SiblingCache,
}

impl AlignmentSnapEngine {
    pub fn new(falloff: SnapFalloff) -> Self {
        Self {
            falloff,
            cache: SiblingCache::default(),
        }
    }

    /// Drop all cached sibling rectangles.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> &SiblingCache {
        &self.cache
    }

    /// Adjust `proposed`, an anchored position for `moving`, towards
    /// alignment with its siblings.
    ///
    /// `threshold` and `frame_motion` are in the parent's layout units.
    pub fn snap(
        &mut self,
        tree: &LayoutTree,
        moving: NodeId,
        proposed: Vec2,
        threshold: f32,
        frame_motion: Vec2,
    ) -> SnapResult {
        let Some(parent) = tree.parent_of(moving) else {
            return SnapResult::unmodified(proposed);
        };
        let Some(candidate) = tree.local_bounds_at(moving, proposed) else {
            return SnapResult::unmodified(proposed);
        };
        if candidate.is_degenerate() {
            return SnapResult::unmodified(proposed);
        }
        if frame_motion.length() > threshold * FAST_DRAG_FACTOR {
            tracing::trace!(motion = frame_motion.length(), "snap suppressed");
            return SnapResult {
                suppressed: true,
                ..SnapResult::unmodified(proposed)
            };
        }

        let mut best: [Option<AxisMatch>; 2] = [None, None];
        for sibling in self.cache.siblings(tree, parent) {
            if sibling.id == moving || sibling.bounds.is_degenerate() {
                continue;
            }
            if !tree.get(sibling.id).is_some_and(|node| node.active) {
                continue;
            }
            for axis in Axis::BOTH {
                let i = axis.index();
                match_axis(
                    extents(&candidate, axis),
                    extents(&sibling.bounds, axis),
                    threshold,
                    &mut best[i],
                );
            }
        }

        let mut result = SnapResult::unmodified(proposed);
        for axis in Axis::BOTH {
            let i = axis.index();
            let Some(found) = best[i] else { continue };
            let pull = self.falloff.pull_strength(found.distance, threshold);
            result.position[i] += found.delta * pull;

            let mut target = Vec2::ZERO;
            target[i] = found.target;
            if let Some(world) = tree.local_to_world(parent, target) {
                result.guides.push(SnapGuide {
                    axis,
                    position: world[i],
                    visible: true,
                });
            }
            tracing::debug!(%axis, distance = found.distance, pull, "snapped");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::UiNode;

    struct Scene {
        tree: LayoutTree,
        moving: NodeId,
        sibling: NodeId,
    }

    /// A 100x50 node and a 100x100 sibling whose left edge is at x=200.
    fn scene(scale: f32) -> Scene {
        let mut tree = LayoutTree::new(Vec2::new(1000.0, 1000.0), scale);
        let root = tree.root();
        let moving = tree
            .insert(
                root,
                UiNode::rect("moving", Vec2::new(100.0, 100.0), Vec2::new(100.0, 50.0)),
            )
            .unwrap();
        let sibling = tree
            .insert(
                root,
                UiNode::rect("sibling", Vec2::new(250.0, 500.0), Vec2::new(100.0, 100.0)),
            )
            .unwrap();
        Scene {
            tree,
            moving,
            sibling,
        }
    }

    /// Proposed position putting the moving node's right edge at `right`.
    fn right_edge_at(right: f32) -> Vec2 {
        Vec2::new(right - 50.0, 100.0)
    }

    #[test]
    fn test_hard_snap_lands_on_edge() {
        let Scene { tree, moving, .. } = scene(1.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Hard);

        let result = engine.snap(&tree, moving, right_edge_at(205.0), 10.0, Vec2::new(2.0, 0.0));
        assert_eq!(result.position, Vec2::new(150.0, 100.0));
        assert_eq!(result.guides.len(), 1);
        assert_eq!(result.guides[0].axis, Axis::X);
        assert_eq!(result.guides[0].position, 200.0);
        assert!(result.guides[0].visible);
    }

    #[test]
    fn test_linear_pull_is_partial() {
        let Scene { tree, moving, .. } = scene(1.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Linear);

        let result = engine.snap(&tree, moving, right_edge_at(205.0), 10.0, Vec2::ZERO);
        assert_eq!(result.position.x, 152.5);
    }

    #[test]
    fn test_zero_distance_is_exact() {
        let Scene { tree, moving, .. } = scene(1.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Linear);

        let result = engine.snap(&tree, moving, right_edge_at(200.0), 10.0, Vec2::ZERO);
        assert_eq!(result.position, right_edge_at(200.0));
        assert_eq!(result.guides.len(), 1);
        assert_eq!(SnapFalloff::Linear.pull_strength(0.0, 10.0), 1.0);
    }

    #[test]
    fn test_pull_decays_to_zero() {
        let Scene { tree, moving, .. } = scene(1.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Linear);

        let mut previous = 1.0;
        for step in 1..=20 {
            let distance = step as f32 * 0.5;
            let proposed = right_edge_at(200.0 + distance);
            let result = engine.snap(&tree, moving, proposed, 10.0, Vec2::ZERO);
            // fraction of the gap that was closed
            let pull = (proposed.x - result.position.x) / distance;
            assert!(pull <= previous + 1e-6, "pull grew at distance {distance}");
            previous = pull;
        }
        assert!(previous.abs() < 1e-6);

        let beyond = right_edge_at(210.5);
        let result = engine.snap(&tree, moving, beyond, 10.0, Vec2::ZERO);
        assert_eq!(result.position, beyond);
        assert!(result.guides.is_empty());
    }

    #[test]
    fn test_fast_drag_suppresses_snapping() {
        let Scene { tree, moving, .. } = scene(1.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Hard);

        let proposed = right_edge_at(203.0);
        let result = engine.snap(&tree, moving, proposed, 10.0, Vec2::new(16.0, 0.0));
        assert!(result.suppressed);
        assert_eq!(result.position, proposed);
        assert!(result.guides.is_empty());

        // Exactly at the limit still snaps
        let result = engine.snap(&tree, moving, proposed, 10.0, Vec2::new(15.0, 0.0));
        assert!(!result.suppressed);
        assert_eq!(result.position.x, 150.0);
    }

    #[test]
    fn test_both_axes_snap_independently() {
        let Scene { tree, moving, .. } = scene(1.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Hard);

        // Right edge near 200, top edge at 447 near the sibling's bottom at 450
        let result = engine.snap(&tree, moving, Vec2::new(153.0, 422.0), 10.0, Vec2::ZERO);
        assert_eq!(result.position, Vec2::new(150.0, 425.0));
        let axes: Vec<_> = result.guides.iter().map(|guide| guide.axis).collect();
        assert_eq!(axes, vec![Axis::X, Axis::Y]);
        assert_eq!(result.guides[1].position, 450.0);
    }

    #[test]
    fn test_inactive_and_degenerate_siblings_are_ignored() {
        let Scene {
            mut tree,
            moving,
            sibling,
        } = scene(1.0);
        tree.get_mut(sibling).unwrap().active = false;
        let root = tree.root();
        tree.insert(
            root,
            UiNode::rect("flat", Vec2::new(250.0, 100.0), Vec2::new(100.0, 0.0)),
        )
        .unwrap();
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Hard);

        let proposed = right_edge_at(205.0);
        let result = engine.snap(&tree, moving, proposed, 10.0, Vec2::ZERO);
        assert_eq!(result.position, proposed);
    }

    #[test]
    fn test_guides_are_in_world_space() {
        let Scene { tree, moving, .. } = scene(2.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Hard);

        let result = engine.snap(&tree, moving, right_edge_at(204.0), 10.0, Vec2::ZERO);
        assert_eq!(result.position.x, 150.0);
        // Layout x=200 at scale 2
        assert_eq!(result.guides[0].position, 400.0);
    }

    #[test]
    fn test_cache_rebuilds_on_structure_change_only() {
        let Scene {
            mut tree,
            moving,
            sibling,
        } = scene(1.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Hard);

        engine.snap(&tree, moving, right_edge_at(205.0), 10.0, Vec2::ZERO);
        tree.set_anchored_position(moving, right_edge_at(150.0));
        engine.snap(&tree, moving, right_edge_at(206.0), 10.0, Vec2::ZERO);
        assert_eq!(engine.cache().rebuilds(), 1);

        // A moved sibling is picked up without a rebuild
        tree.set_anchored_position(sibling, Vec2::new(260.0, 500.0));
        let result = engine.snap(&tree, moving, right_edge_at(207.0), 10.0, Vec2::ZERO);
        assert_eq!(result.position.x, 160.0);
        assert_eq!(engine.cache().rebuilds(), 1);

        let root = tree.root();
        tree.insert(root, UiNode::new("new")).unwrap();
        engine.snap(&tree, moving, right_edge_at(207.0), 10.0, Vec2::ZERO);
        assert_eq!(engine.cache().rebuilds(), 2);
    }

    #[test]
    fn test_reparented_sibling_stops_matching() {
        let Scene {
            mut tree,
            moving,
            sibling,
        } = scene(1.0);
        let root = tree.root();
        let holder = tree
            .insert(
                root,
                UiNode::rect("holder", Vec2::new(800.0, 800.0), Vec2::new(50.0, 50.0)),
            )
            .unwrap();
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Hard);

        let proposed = right_edge_at(205.0);
        let result = engine.snap(&tree, moving, proposed, 10.0, Vec2::ZERO);
        assert_eq!(result.position.x, 150.0);
        assert_eq!(engine.cache().rebuilds(), 1);

        tree.reparent(sibling, holder).unwrap();
        let result = engine.snap(&tree, moving, proposed, 10.0, Vec2::ZERO);
        assert_eq!(result.position, proposed);
        assert!(result.guides.is_empty());
        assert_eq!(engine.cache().rebuilds(), 2);
    }

    #[test]
    fn test_removed_sibling_stops_matching() {
        let Scene {
            mut tree,
            moving,
            sibling,
        } = scene(1.0);
        let mut engine = AlignmentSnapEngine::new(SnapFalloff::Hard);

        let proposed = right_edge_at(205.0);
        let result = engine.snap(&tree, moving, proposed, 10.0, Vec2::ZERO);
        assert_eq!(result.position.x, 150.0);

        tree.remove(sibling).unwrap();
        let result = engine.snap(&tree, moving, proposed, 10.0, Vec2::ZERO);
        assert_eq!(result.position, proposed);
        assert!(result.guides.is_empty());
        assert_eq!(engine.cache().rebuilds(), 2);
    }

    #[test]
    fn test_threshold_zero_only_matches_exactly() {
        assert_eq!(SnapFalloff::Linear.pull_strength(0.0, 0.0), 1.0);
        let mut best = None;
        match_axis([0.0, 10.0, 5.0], [0.5, 20.0, 10.25], 0.0, &mut best);
        assert!(best.is_none());
    }
}
