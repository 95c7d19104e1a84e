use super::*;
use crate::geom::{AreaGeometry, Coord, Location, Polygon};
use crate::intersect::LineIntersector;
use nalgebra::vector;

fn square(x0: f64, y0: f64, side: f64) -> Vec<Coord> {
    vec![
        vector![x0, y0],
        vector![x0 + side, y0],
        vector![x0 + side, y0 + side],
        vector![x0, y0 + side],
        vector![x0, y0],
    ]
}

#[test]
fn shell_and_hole_sides_follow_orientation() {
    let shell = square(0.0, 0.0, 10.0); // ccw
    let hole: Vec<Coord> = square(2.0, 2.0, 2.0).into_iter().rev().collect(); // cw
    let g = BoundaryGraph::from_area(&Polygon::new(shell, vec![hole]).into()).unwrap();
    assert_eq!(g.ring_count(), 2);
    let s = g.edges()[0].label();
    assert_eq!(s.left, Some(Location::Interior));
    assert_eq!(s.right, Some(Location::Exterior));
    assert_eq!(s.on, Some(Location::Boundary));
    let h = g.edges()[1].label();
    assert_eq!(h.left, Some(Location::Interior));
    assert_eq!(h.right, Some(Location::Exterior));
    assert_eq!(g.ring_role(RingId(1)), Some(RingRole::Hole { shell: RingId(0) }));
    // One node per ring start.
    assert_eq!(g.nodes().len(), 2);
}

#[test]
fn repeated_points_are_removed_from_edges() {
    let mut ring = square(0.0, 0.0, 1.0);
    let dup = ring[1];
    ring.insert(1, dup);
    let g = BoundaryGraph::from_area(&Polygon::simple(ring).into()).unwrap();
    assert_eq!(g.edges()[0].num_points(), 5);
    assert!(g.edges()[0].is_closed());
}

#[test]
fn builder_rejects_malformed_rings() {
    let mut b = BoundaryGraphBuilder::new();
    let open = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![1.0, 1.0], vector![0.0, 1.0]];
    assert!(matches!(
        b.add_shell(&open),
        Err(TopologyError::RingNotClosed { ring: RingId(0), .. })
    ));
    let short = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 0.0]];
    let err = b.add_shell(&short).unwrap_err();
    assert_eq!(
        err,
        TopologyError::TooFewPoints {
            ring: RingId(0),
            count: 3,
            point: Some(vector![0.0, 0.0]),
        }
    );
    assert_eq!(err.to_string(), "ring 0 has 3 distinct points (needs at least 4)");
    assert!(err.to_string().is_ascii());
    let mut nan = square(0.0, 0.0, 1.0);
    nan[2].x = f64::NAN;
    assert!(matches!(
        b.add_shell(&nan),
        Err(TopologyError::NonFiniteCoordinate { .. })
    ));
    assert!(b.build().is_empty());
}

#[test]
fn hole_must_reference_a_shell() {
    let mut b = BoundaryGraphBuilder::new();
    let shell = b.add_shell(&square(0.0, 0.0, 10.0)).unwrap();
    let hole = b.add_hole(shell, &square(1.0, 1.0, 1.0)).unwrap();
    let err = b.add_hole(hole, &square(5.0, 5.0, 1.0)).unwrap_err();
    assert_eq!(
        err,
        TopologyError::ShellHoleIdentity {
            hole: RingId(2),
            shell: RingId(1)
        }
    );
    assert!(err.point().is_none());
    assert!(err.to_string().contains("not a shell"));
    assert!(matches!(
        b.add_hole(RingId(7), &square(5.0, 5.0, 1.0)),
        Err(TopologyError::ShellHoleIdentity { .. })
    ));
}

#[test]
fn self_nodes_report_figure_eight_crossing() {
    let ring = vec![
        vector![0.0, 0.0],
        vector![2.0, 2.0],
        vector![2.0, 0.0],
        vector![0.0, 2.0],
        vector![0.0, 0.0],
    ];
    let mut g = BoundaryGraph::from_area(&Polygon::simple(ring).into()).unwrap();
    let mut li = LineIntersector::new();
    let sn = g.compute_self_nodes(&mut li, true);
    assert!(sn.has_proper_intersection());
    assert_eq!(sn.proper_intersection_point, Some(vector![1.0, 1.0]));
    assert!(g.nodes().iter().any(|n| n.coord == vector![1.0, 1.0]));
}

#[test]
fn simple_ring_has_no_self_intersections() {
    let mut g = BoundaryGraph::from_area(&Polygon::simple(square(0.0, 0.0, 1.0)).into()).unwrap();
    let mut li = LineIntersector::new();
    let sn = g.compute_self_nodes(&mut li, true);
    assert!(!sn.has_proper_intersection());
    assert_eq!(sn.intersection_count, 0);
    assert!(g.edges()[0].intersections().is_empty());
    assert_eq!(g.nodes().len(), 1);
}

#[test]
fn touching_rings_are_noded_at_the_shared_vertex() {
    let area = AreaGeometry::multi(vec![
        Polygon::simple(square(0.0, 0.0, 1.0)),
        Polygon::simple(square(1.0, 1.0, 1.0)),
    ]);
    let mut g = BoundaryGraph::from_area(&area).unwrap();
    let mut li = LineIntersector::new();
    let sn = g.compute_self_nodes(&mut li, true);
    assert!(!sn.has_proper_intersection());
    assert!(sn.intersection_count > 0);
    let touch = vector![1.0, 1.0];
    for e in g.edges() {
        assert!(e.intersections().iter().any(|ei| ei.coord == touch));
    }
    // Second ring starts at the touch point, so no extra node appears.
    assert_eq!(g.nodes().len(), 2);
}

#[test]
fn self_noding_is_idempotent() {
    let area = AreaGeometry::multi(vec![
        Polygon::simple(square(0.0, 0.0, 2.0)),
        Polygon::simple(square(1.0, 0.0, 2.0)),
    ]);
    let mut g = BoundaryGraph::from_area(&area).unwrap();
    let mut li = LineIntersector::new();
    let first = g.compute_self_nodes(&mut li, true);
    let counts: Vec<usize> = g.edges().iter().map(|e| e.intersections().len()).collect();
    let nodes = g.nodes().len();
    let second = g.compute_self_nodes(&mut li, true);
    assert_eq!(first, second);
    let again: Vec<usize> = g.edges().iter().map(|e| e.intersections().len()).collect();
    assert_eq!(counts, again);
    assert_eq!(nodes, g.nodes().len());
}

#[test]
fn intersection_list_normalizes_vertex_hits() {
    let mut e = Edge::new(
        square(0.0, 0.0, 1.0),
        crate::geom::Label::node(Location::Boundary),
        RingId(0),
    );
    // Hit at the end vertex of segment 0 moves to segment 1, distance 0.
    e.add_intersection(vector![1.0, 0.0], 0, 1.0);
    e.add_intersection(vector![1.0, 0.0], 1, 0.0);
    assert_eq!(e.intersections().len(), 1);
    let ei = e.intersections().iter().next().unwrap();
    assert_eq!((ei.segment_index, ei.dist), (1, 0.0));
    let full = e.intersections().with_endpoints(e.coords());
    assert_eq!(full.len(), 3);
    let segs: Vec<usize> = full.iter().map(|ei| ei.segment_index).collect();
    assert_eq!(segs, vec![0, 1, 4]);
}

#[test]
fn sweep_keeps_every_pair_with_overlapping_x_extent() {
    use crate::rand::{draw_star_ring, ReplayToken, StarCfg};
    let polys = (0..3u64)
        .map(|i| {
            let cfg = StarCfg {
                center: vector![1.5 * i as f64, 0.0],
                ..StarCfg::default()
            };
            Polygon::simple(draw_star_ring(cfg, ReplayToken { seed: 3, index: i }))
        })
        .collect();
    let g = BoundaryGraph::from_area(&AreaGeometry::multi(polys)).unwrap();
    let x_extent = |c: &[Coord], s: usize| (c[s].x.min(c[s + 1].x), c[s].x.max(c[s + 1].x));
    let mut expected = Vec::new();
    for i0 in 0..g.edges.len() {
        for i1 in i0..g.edges.len() {
            let (a, b) = (&g.edges[i0].coords, &g.edges[i1].coords);
            for s0 in 0..a.len() - 1 {
                let from = if i0 == i1 { s0 + 1 } else { 0 };
                for s1 in from..b.len() - 1 {
                    let (ea, eb) = (x_extent(a, s0), x_extent(b, s1));
                    if ea.0 <= eb.1 && eb.0 <= ea.1 {
                        expected.push((i0, i1, s0, s1));
                    }
                }
            }
        }
    }
    let pairs = super::self_nodes::candidate_pairs(&g.edges);
    assert_eq!(pairs, expected);
    // Rings 0 and 2 have disjoint x extents, so none of their pairs survive.
    assert!(pairs.iter().all(|&(i0, i1, _, _)| (i0, i1) != (0, 2)));
}
