// The composable per-step forces, summed into node velocities.
//
// All of these scale with the simulator's alpha except collision, which is a
// hard separation constraint and applies at full strength every step.

use super::{LayoutConfig, PointF, SimLink, SimNode};

/// Charge interactions closer than this are treated as being at distance 1,
/// bounding the inverse-square term.
const MIN_DISTANCE2: f32 = 1.0;

/// Deterministic stand-in for a jiggle when two nodes coincide exactly.
fn nudge(i: usize) -> f32 {
    1e-6 * (i as f32 + 1.0)
}

/// Spring along every prerequisite/root edge toward the rest length. The
/// better-connected endpoint moves less (degree bias), which keeps hubs
/// steady while leaves swing around them.
pub(super) fn apply_link_force(
    nodes: &mut [SimNode],
    links: &[SimLink],
    distance: f32,
    alpha: f32,
) {
    for link in links {
        let s = link.source;
        let t = link.target;
        let mut dx = (nodes[t].x + nodes[t].vx) - (nodes[s].x + nodes[s].vx);
        let mut dy = (nodes[t].y + nodes[t].vy) - (nodes[s].y + nodes[s].vy);
        if dx == 0.0 && dy == 0.0 {
            dx = nudge(s);
            dy = nudge(t);
        }
        let len = (dx * dx + dy * dy).sqrt();
        let f = (len - distance) / len * alpha * link.strength;
        dx *= f;
        dy *= f;
        nodes[t].vx -= dx * link.bias;
        nodes[t].vy -= dy * link.bias;
        nodes[s].vx += dx * (1.0 - link.bias);
        nodes[s].vy += dy * (1.0 - link.bias);
    }
}

/// Pairwise inverse-square charge. Negative strength repels, spreading the
/// graph and keeping unrelated branches apart.
pub(super) fn apply_charge(nodes: &mut [SimNode], strength: f32, alpha: f32) {
    let n = nodes.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let mut dx = nodes[j].x - nodes[i].x;
            let mut dy = nodes[j].y - nodes[i].y;
            if dx == 0.0 && dy == 0.0 {
                dx = nudge(i);
                dy = nudge(j);
            }
            let l2 = (dx * dx + dy * dy).max(MIN_DISTANCE2);
            let w = strength * alpha / l2;
            nodes[i].vx += dx * w;
            nodes[i].vy += dy * w;
            nodes[j].vx -= dx * w;
            nodes[j].vy -= dy * w;
        }
    }
}

/// Horizontal centering plus the vertical layer spring that enforces the
/// causal top-to-bottom reading order.
pub(super) fn apply_axis_springs(nodes: &mut [SimNode], cfg: &LayoutConfig, alpha: f32) {
    let center_x = cfg.width / 2.0;
    for node in nodes.iter_mut() {
        let target_y = cfg.base_y + node.level as f32 * cfg.layer_spacing;
        node.vx += (center_x - node.x) * cfg.center_strength * alpha;
        node.vy += (target_y - node.y) * cfg.layer_strength * alpha;
    }
}

/// Minimum-separation constraint: any pair of predicted positions closer
/// than twice the radius is pushed apart along the center axis. A pinned
/// node never moves; its counterpart absorbs the whole correction.
pub(super) fn apply_collision(nodes: &mut [SimNode], radius: f32) {
    let min_dist = radius * 2.0;
    let n = nodes.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if nodes[i].pinned() && nodes[j].pinned() {
                continue;
            }
            let xi = nodes[i].x + nodes[i].vx;
            let yi = nodes[i].y + nodes[i].vy;
            let xj = nodes[j].x + nodes[j].vx;
            let yj = nodes[j].y + nodes[j].vy;
            let mut dx = xj - xi;
            let mut dy = yj - yi;
            if dx == 0.0 && dy == 0.0 {
                dx = nudge(i);
                dy = nudge(j);
            }
            let len = (dx * dx + dy * dy).sqrt();
            if len >= min_dist {
                continue;
            }
            let overlap = (min_dist - len) / len;
            dx *= overlap;
            dy *= overlap;
            if nodes[i].pinned() {
                nodes[j].vx += dx;
                nodes[j].vy += dy;
            } else if nodes[j].pinned() {
                nodes[i].vx -= dx;
                nodes[i].vy -= dy;
            } else {
                nodes[i].vx -= dx * 0.5;
                nodes[i].vy -= dy * 0.5;
                nodes[j].vx += dx * 0.5;
                nodes[j].vy += dy * 0.5;
            }
        }
    }
}

/// Deterministic phyllotaxis seeding around an origin: successive indices
/// spiral outward, so freshly inserted nodes never start coincident.
pub(super) fn seed_position(i: usize, origin: PointF) -> PointF {
    let initial_radius = 10.0f32;
    let initial_angle = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());
    let r = initial_radius * (0.5 + i as f32).sqrt();
    let a = i as f32 * initial_angle;
    PointF {
        x: origin.x + r * a.cos(),
        y: origin.y + r * a.sin(),
    }
}
