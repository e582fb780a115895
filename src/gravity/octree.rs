//! Barnes-Hut octree gravity solver.
//!
//! The tree approximates the net force on a particle by treating distant
//! groups of particles as a single point mass at their center of mass,
//! replacing the O(N²) all-pairs sum with an O(N log N) traversal.
//!
//! Nodes live in a flat arena (`Vec<OctreeNode>`) and reference their
//! children by index, so tearing a tree down is a single deallocation and
//! there is no pointer chasing during construction. The tree is ephemeral:
//! it is rebuilt from the current alive particles every step that uses it
//! and dropped as soon as accelerations have been extracted.

use rayon::prelude::*;

use crate::particles::ParticleStore;

/// Relative padding applied to the bounding cube so particles sitting on
/// the extremal coordinates do not land exactly on an octant boundary.
const BBOX_PADDING: f64 = 1.0001;

/// Maximum subdivision depth. Two particles that still share a leaf after
/// this many halvings are closer than the cube can resolve and are treated
/// as unseparable.
const MAX_DEPTH: usize = 64;

const INV_R3_FLOOR: f64 = 1.0e-20;

/// Discriminates what a node holds.
///
/// Exactly one of: nothing, a single particle index, or up to 8 children
/// addressed by octant. Children are arena indices; `None` marks an octant
/// with no particles beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Empty,
    Leaf(usize),
    Internal([Option<usize>; 8]),
}

/// A single octree node: a cubic region plus its monopole aggregates.
#[derive(Debug, Clone, Copy)]
pub struct OctreeNode {
    pub cx: f64,
    pub cy: f64,
    pub cz: f64,
    /// Half the side length of this node's cube.
    pub half: f64,
    /// Total mass of every particle in this subtree.
    pub mass: f64,
    pub com_x: f64,
    pub com_y: f64,
    pub com_z: f64,
    pub kind: NodeKind,
}

impl OctreeNode {
    fn new(cx: f64, cy: f64, cz: f64, half: f64) -> Self {
        OctreeNode {
            cx,
            cy,
            cz,
            half,
            mass: 0.0,
            com_x: cx,
            com_y: cy,
            com_z: cz,
            kind: NodeKind::Empty,
        }
    }

    /// Octant index for a point relative to this node's center.
    /// Bit 0 is +x, bit 1 is +y, bit 2 is +z; ties go to the positive side.
    #[inline]
    fn octant(&self, x: f64, y: f64, z: f64) -> usize {
        let mut idx = 0;
        if x >= self.cx {
            idx |= 1;
        }
        if y >= self.cy {
            idx |= 2;
        }
        if z >= self.cz {
            idx |= 4;
        }
        idx
    }

    /// Center of the child cube for a given octant.
    #[inline]
    fn child_center(&self, oct: usize) -> (f64, f64, f64) {
        let q = self.half * 0.5;
        (
            self.cx + if oct & 1 != 0 { q } else { -q },
            self.cy + if oct & 2 != 0 { q } else { -q },
            self.cz + if oct & 4 != 0 { q } else { -q },
        )
    }
}

/// A complete Barnes-Hut octree built over the alive particles of a store.
///
/// # Examples
///
/// ```
/// use rs_starform::gravity::Octree;
/// use rs_starform::particles::ParticleStore;
///
/// let mut store = ParticleStore::new(3);
/// store.x[0] = -1.0;
/// store.x[1] = 1.0;
/// store.y[2] = 2.0;
/// let tree = Octree::build(&store);
/// // The root aggregates the whole population.
/// assert_eq!(tree.total_mass(), 3.0);
/// ```
pub struct Octree {
    nodes: Vec<OctreeNode>,
    root: usize,
    /// Particles that could not be separated from a leaf occupant within
    /// `MAX_DEPTH` halvings (exactly or nearly coincident positions). They
    /// are excluded from the node aggregates and evaluated pairwise during
    /// traversal so their mass is never lost.
    overflow: Vec<usize>,
}

impl Octree {
    /// Builds a fresh tree from the current alive particle positions.
    ///
    /// The bounding cube encloses every alive particle with a small relative
    /// padding; an empty or zero-extent population falls back to a unit box
    /// so the build never fails on degenerate geometry.
    pub fn build(store: &ParticleStore) -> Self {
        store.assert_coherent();
        let (cx, cy, cz, half) = bounding_cube(store);

        let mut tree = Octree {
            nodes: Vec::with_capacity(2 * store.len().max(1)),
            root: 0,
            overflow: Vec::new(),
        };
        tree.nodes.push(OctreeNode::new(cx, cy, cz, half));

        for i in 0..store.len() {
            if store.alive[i] {
                tree.insert(store, i);
            }
        }
        tree.compute_aggregates(store);
        tree
    }

    /// Total mass aggregated at the root, overflow particles excluded.
    pub fn total_mass(&self) -> f64 {
        self.nodes[self.root].mass
    }

    /// Number of arena nodes allocated for this build.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn insert(&mut self, store: &ParticleStore, p: usize) {
        let (px, py, pz) = store.position(p);
        let mut cur = self.root;
        let mut depth = 0;

        loop {
            if depth >= MAX_DEPTH {
                self.overflow.push(p);
                return;
            }
            match self.nodes[cur].kind {
                NodeKind::Empty => {
                    self.nodes[cur].kind = NodeKind::Leaf(p);
                    return;
                }
                NodeKind::Leaf(occupant) => {
                    let (ox, oy, oz) = store.position(occupant);
                    if ox == px && oy == py && oz == pz {
                        // no cube subdivision can ever separate these two
                        self.overflow.push(p);
                        return;
                    }
                    // split the leaf, push the occupant one level down, then
                    // keep descending with the new particle from this node
                    self.nodes[cur].kind = NodeKind::Internal([None; 8]);
                    let oct = self.nodes[cur].octant(ox, oy, oz);
                    let child = self.ensure_child(cur, oct);
                    self.nodes[child].kind = NodeKind::Leaf(occupant);
                }
                NodeKind::Internal(_) => {
                    let oct = self.nodes[cur].octant(px, py, pz);
                    cur = self.ensure_child(cur, oct);
                    depth += 1;
                }
            }
        }
    }

    /// Returns the arena index of the given child, creating it on demand.
    fn ensure_child(&mut self, parent: usize, oct: usize) -> usize {
        if let NodeKind::Internal(children) = self.nodes[parent].kind {
            if let Some(idx) = children[oct] {
                return idx;
            }
        }
        let (cx, cy, cz) = self.nodes[parent].child_center(oct);
        let half = self.nodes[parent].half * 0.5;
        let idx = self.nodes.len();
        self.nodes.push(OctreeNode::new(cx, cy, cz, half));
        if let NodeKind::Internal(ref mut children) = self.nodes[parent].kind {
            children[oct] = Some(idx);
        }
        idx
    }

    /// Computes mass and center-of-mass for every node, bottom-up.
    ///
    /// Children are always allocated after their parent, so a single
    /// reverse pass over the arena visits every child before its parent.
    /// Runs exactly once per build.
    fn compute_aggregates(&mut self, store: &ParticleStore) {
        for idx in (0..self.nodes.len()).rev() {
            match self.nodes[idx].kind {
                NodeKind::Empty => {
                    self.nodes[idx].mass = 0.0;
                }
                NodeKind::Leaf(p) => {
                    self.nodes[idx].mass = store.mass[p];
                    self.nodes[idx].com_x = store.x[p];
                    self.nodes[idx].com_y = store.y[p];
                    self.nodes[idx].com_z = store.z[p];
                }
                NodeKind::Internal(children) => {
                    let mut mass = 0.0;
                    let mut mx = 0.0;
                    let mut my = 0.0;
                    let mut mz = 0.0;
                    for child in children.iter().flatten() {
                        let c = &self.nodes[*child];
                        if c.mass > 0.0 {
                            mass += c.mass;
                            mx += c.mass * c.com_x;
                            my += c.mass * c.com_y;
                            mz += c.mass * c.com_z;
                        }
                    }
                    let node = &mut self.nodes[idx];
                    node.mass = mass;
                    if mass > 0.0 {
                        node.com_x = mx / mass;
                        node.com_y = my / mass;
                        node.com_z = mz / mass;
                    } else {
                        node.com_x = node.cx;
                        node.com_y = node.cy;
                        node.com_z = node.cz;
                    }
                }
            }
        }
    }

    /// Net gravitational acceleration on particle `i`.
    ///
    /// Iterative traversal with an explicit stack. For each node:
    /// zero-mass nodes are skipped; a foreign leaf contributes the exact
    /// softened pair force; an internal node satisfying the opening
    /// criterion `size / distance < theta` is approximated as a point mass
    /// at its center of mass, otherwise its children are pushed. With
    /// `theta = 0` the criterion never holds and the traversal reproduces
    /// the direct sum.
    pub fn acceleration_on(
        &self,
        store: &ParticleStore,
        i: usize,
        g: f64,
        softening: f64,
        theta: f64,
    ) -> (f64, f64, f64) {
        let (px, py, pz) = store.position(i);
        let eps2 = softening * softening;
        let mut ax = 0.0;
        let mut ay = 0.0;
        let mut az = 0.0;

        let mut stack: Vec<usize> = Vec::with_capacity(64);
        stack.push(self.root);

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if node.mass == 0.0 {
                continue;
            }
            match node.kind {
                NodeKind::Empty => {}
                NodeKind::Leaf(j) => {
                    if j == i {
                        continue;
                    }
                    let (dax, day, daz) =
                        pair_accel(px, py, pz, store.x[j], store.y[j], store.z[j], store.mass[j], g, eps2);
                    ax += dax;
                    ay += day;
                    az += daz;
                }
                NodeKind::Internal(children) => {
                    let dx = node.com_x - px;
                    let dy = node.com_y - py;
                    let dz = node.com_z - pz;
                    let dist2 = dx * dx + dy * dy + dz * dz + eps2;
                    let dist = dist2.sqrt();
                    let size = node.half * 2.0;

                    if dist > 0.0 && size / dist < theta {
                        // far enough: monopole approximation at the node COM
                        let inv_r3 = 1.0 / (dist2 * dist + INV_R3_FLOOR);
                        let s = g * node.mass * inv_r3;
                        ax += s * dx;
                        ay += s * dy;
                        az += s * dz;
                    } else {
                        for child in children.iter().flatten() {
                            stack.push(*child);
                        }
                    }
                }
            }
        }

        // unseparable particles are not in the tree aggregates
        for &j in &self.overflow {
            if j == i {
                continue;
            }
            let (dax, day, daz) =
                pair_accel(px, py, pz, store.x[j], store.y[j], store.z[j], store.mass[j], g, eps2);
            ax += dax;
            ay += day;
            az += daz;
        }

        (ax, ay, az)
    }
}

#[inline]
#[allow(clippy::too_many_arguments)]
fn pair_accel(
    px: f64,
    py: f64,
    pz: f64,
    qx: f64,
    qy: f64,
    qz: f64,
    m: f64,
    g: f64,
    eps2: f64,
) -> (f64, f64, f64) {
    let dx = qx - px;
    let dy = qy - py;
    let dz = qz - pz;
    let r2 = dx * dx + dy * dy + dz * dz + eps2;
    let denom = r2.sqrt();
    let inv_r3 = 1.0 / (denom * r2 + INV_R3_FLOOR);
    let s = g * m * inv_r3;
    (s * dx, s * dy, s * dz)
}

/// Axis-aligned cubic bounding volume over the alive particles.
///
/// Returns `(cx, cy, cz, half_extent)`. Falls back to a unit box centered
/// at the origin when no particle is alive or the population has zero
/// spatial extent.
fn bounding_cube(store: &ParticleStore) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut min_z = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut max_z = f64::NEG_INFINITY;
    let mut any = false;

    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        any = true;
        min_x = min_x.min(store.x[i]);
        min_y = min_y.min(store.y[i]);
        min_z = min_z.min(store.z[i]);
        max_x = max_x.max(store.x[i]);
        max_y = max_y.max(store.y[i]);
        max_z = max_z.max(store.z[i]);
    }

    if !any {
        return (0.0, 0.0, 0.0, 0.5);
    }

    let cx = 0.5 * (min_x + max_x);
    let cy = 0.5 * (min_y + max_y);
    let cz = 0.5 * (min_z + max_z);
    let mut half = 0.5 * (max_x - min_x).max(max_y - min_y).max(max_z - min_z);
    if half <= 0.0 {
        half = 0.5;
    }
    (cx, cy, cz, half * BBOX_PADDING)
}

/// Computes gravitational accelerations with the Barnes-Hut approximation.
///
/// Builds a fresh octree over the alive particles, queries it once per
/// alive particle (queries are read-only and run in parallel), writes the
/// results into the store's acceleration arrays, and drops the tree.
pub fn compute_gravity_tree(store: &mut ParticleStore, g: f64, softening: f64, theta: f64) {
    store.assert_coherent();
    let tree = Octree::build(store);
    log::debug!(
        "octree built: {} nodes, {} overflow, total mass {:.6}",
        tree.node_count(),
        tree.overflow.len(),
        tree.total_mass()
    );

    let snapshot: &ParticleStore = store;
    let accels: Vec<(f64, f64, f64)> = (0..snapshot.len())
        .into_par_iter()
        .map(|i| {
            if snapshot.alive[i] {
                tree.acceleration_on(snapshot, i, g, softening, theta)
            } else {
                (0.0, 0.0, 0.0)
            }
        })
        .collect();

    for (i, (ax, ay, az)) in accels.into_iter().enumerate() {
        store.ax[i] = ax;
        store.ay[i] = ay;
        store.az[i] = az;
    }
}
