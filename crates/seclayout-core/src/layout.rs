//! Layered layout: multi-source BFS levels plus per-level horizontal slots.
//!
//! Levels are hop counts from the nearest root. Within a level, nodes are ranked by identifier
//! (byte-wise string order), so the result only depends on identifiers and edges, never on the
//! order nodes were supplied in. Nodes the BFS never reaches go on one extra row below the
//! deepest level.

use crate::error::{Error, Result};
use crate::model::Graph;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_WIDTH: i64 = 1000;
pub const DEFAULT_HEIGHT: i64 = 550;
pub const DEFAULT_TOP_MARGIN: i64 = 50;
pub const DEFAULT_LEVEL_HEIGHT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Drawing area width; each level divides it into `count + 1` equal gaps.
    pub width: i64,
    /// Drawing area height. Carried for renderers; placement does not read it.
    pub height: i64,
    pub top_margin: i64,
    pub level_height: i64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            top_margin: DEFAULT_TOP_MARGIN,
            level_height: DEFAULT_LEVEL_HEIGHT,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 {
            return Err(Error::InvalidOptions {
                message: format!("width must be positive, got {}", self.width),
            });
        }
        for (name, value) in [
            ("height", self.height),
            ("topMargin", self.top_margin),
            ("levelHeight", self.level_height),
        ] {
            if value < 0 {
                return Err(Error::InvalidOptions {
                    message: format!("{name} must not be negative, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Saturates at the `i64` bounds.
    fn row_y(&self, level: i64) -> i64 {
        self.top_margin
            .saturating_add(level.saturating_mul(self.level_height))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    /// BFS seeds, in node order.
    pub roots: Vec<String>,
    pub max_level: i64,
    /// Distinct identifiers reached by BFS.
    pub reached: usize,
    /// Node records placed on the overflow row.
    pub unreached: usize,
}

/// Assigns `level`, `x` and `y` to every node of `graph` in place.
///
/// Nodes and edges are neither added nor removed, and `security` is left exactly as it was.
/// Edges naming identifiers that are not in `graph.nodes` are ignored, so the result is defined
/// even for unsanitized input. When identifiers repeat, every record sharing an identifier gets
/// that identifier's position.
pub fn layout(graph: &mut Graph, opts: &LayoutOptions) -> LayoutStats {
    if graph.is_empty() {
        return LayoutStats::default();
    }

    let security: Vec<i64> = graph.nodes.iter().map(|n| n.security).collect();

    // Dense slots for distinct identifiers, in first-appearance order.
    let mut ids: Vec<String> = Vec::new();
    let mut slot_of: HashMap<String, usize> = HashMap::default();
    for n in &graph.nodes {
        if !slot_of.contains_key(&n.id) {
            slot_of.insert(n.id.clone(), ids.len());
            ids.push(n.id.clone());
        }
    }

    let mut incoming: Vec<usize> = vec![0; ids.len()];
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
    for e in &graph.edges {
        let (Some(&from), Some(&to)) = (slot_of.get(&e.from), slot_of.get(&e.to)) else {
            continue;
        };
        incoming[to] += 1;
        outgoing[from].push(to);
    }

    let roots = select_roots(&incoming);
    let levels = bfs_levels(&roots, &outgoing);

    let max_level = levels.iter().flatten().copied().max().unwrap_or(0);
    let mut per_level: HashMap<i64, Vec<usize>> = HashMap::default();
    for (slot, level) in levels.iter().enumerate() {
        if let Some(level) = *level {
            per_level.entry(level).or_default().push(slot);
        }
    }

    // (level, x, y) per reached slot.
    let mut placed: Vec<Option<(i64, i64, i64)>> = vec![None; ids.len()];
    for (&level, slots) in per_level.iter_mut() {
        slots.sort_by(|&a, &b| ids[a].cmp(&ids[b]));
        let spacing = opts.width / (slots.len() as i64 + 1);
        for (rank, &slot) in slots.iter().enumerate() {
            let x = (rank as i64 + 1).saturating_mul(spacing);
            placed[slot] = Some((level, x, opts.row_y(level)));
        }
    }

    let reached = placed.iter().filter(|p| p.is_some()).count();
    let extra_level = max_level + 1;
    let extra_y = opts.row_y(extra_level);
    let denominator = graph.nodes.len().saturating_sub(reached) as i64 + 1;
    debug_assert!(denominator >= 1);
    let extra_spacing = opts.width / denominator.max(1);

    let mut unreached = 0usize;
    for node in graph.nodes.iter_mut() {
        match slot_of.get(&node.id).and_then(|&slot| placed[slot]) {
            Some((level, x, y)) => {
                node.level = level;
                node.x = x;
                node.y = y;
            }
            None => {
                unreached += 1;
                node.level = extra_level;
                node.x = (unreached as i64).saturating_mul(extra_spacing);
                node.y = extra_y;
            }
        }
    }

    for (node, security) in graph.nodes.iter_mut().zip(security) {
        node.security = security;
    }

    let stats = LayoutStats {
        roots: roots.iter().map(|&slot| ids[slot].clone()).collect(),
        max_level,
        reached,
        unreached,
    };
    tracing::debug!(
        roots = stats.roots.len(),
        max_level = stats.max_level,
        reached = stats.reached,
        unreached = stats.unreached,
        "laid out graph"
    );
    stats
}

/// Zero in-degree slots; failing that, every slot tied at the minimum in-degree.
fn select_roots(incoming: &[usize]) -> Vec<usize> {
    let sources: Vec<usize> = (0..incoming.len())
        .filter(|&slot| incoming[slot] == 0)
        .collect();
    if !sources.is_empty() {
        return sources;
    }

    let Some(&min) = incoming.iter().min() else {
        return Vec::new();
    };
    tracing::warn!(
        min_incoming = min,
        "graph has no source nodes; seeding layout from minimum in-degree nodes"
    );
    (0..incoming.len())
        .filter(|&slot| incoming[slot] == min)
        .collect()
}

/// First-wins BFS from all roots at once. `None` marks slots no root reaches.
fn bfs_levels(roots: &[usize], outgoing: &[Vec<usize>]) -> Vec<Option<i64>> {
    let mut levels: Vec<Option<i64>> = vec![None; outgoing.len()];
    let mut queue: VecDeque<(usize, i64)> = VecDeque::new();
    for &root in roots {
        if levels[root].is_none() {
            levels[root] = Some(0);
            queue.push_back((root, 0));
        }
    }

    while let Some((slot, level)) = queue.pop_front() {
        let next = level + 1;
        for &child in &outgoing[slot] {
            if levels[child].is_none() {
                levels[child] = Some(next);
                queue.push_back((child, next));
            }
        }
    }

    levels
}
