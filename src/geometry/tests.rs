use super::*;

fn square() -> Vec<BoundaryVertex> {
    vec![
        BoundaryVertex::new(10.0, 10.0),
        BoundaryVertex::new(90.0, 10.0),
        BoundaryVertex::new(90.0, 90.0),
        BoundaryVertex::new(10.0, 90.0),
    ]
}

#[test]
fn test_center_is_inside() {
    assert!(contains(&Coordinate::new(50.0, 50.0), &square()));
}

#[test]
fn test_corner_outside() {
    assert!(!contains(&Coordinate::new(5.0, 5.0), &square()));
    assert!(!contains(&Coordinate::new(95.0, 95.0), &square()));
}

#[test]
fn test_outside_on_single_axis() {
    // Within the longitude band but past the far latitude edge
    assert!(!contains(&Coordinate::new(95.0, 50.0), &square()));
    // Within the latitude band but below the near longitude edge
    assert!(!contains(&Coordinate::new(50.0, 5.0), &square()));
}

#[test]
fn test_vertices_resolve_half_open() {
    let poly = square();
    // Minimum corner counts as inside
    assert!(contains(&Coordinate::new(10.0, 10.0), &poly));
    // Every other corner touches a maximum edge and counts as outside
    assert!(!contains(&Coordinate::new(90.0, 10.0), &poly));
    assert!(!contains(&Coordinate::new(90.0, 90.0), &poly));
    assert!(!contains(&Coordinate::new(10.0, 90.0), &poly));
}

#[test]
fn test_edges_resolve_half_open() {
    let poly = square();
    assert!(contains(&Coordinate::new(10.0, 50.0), &poly));
    assert!(contains(&Coordinate::new(50.0, 10.0), &poly));
    assert!(!contains(&Coordinate::new(90.0, 50.0), &poly));
    assert!(!contains(&Coordinate::new(50.0, 90.0), &poly));
}

#[test]
fn test_vertex_result_is_deterministic() {
    let poly = square();
    let p = Coordinate::new(90.0, 90.0);
    let first = contains(&p, &poly);
    for _ in 0..10 {
        assert_eq!(contains(&p, &poly), first);
    }
}

#[test]
fn test_triangle() {
    let tri = vec![
        BoundaryVertex::new(0.0, 0.0),
        BoundaryVertex::new(10.0, 0.0),
        BoundaryVertex::new(5.0, 10.0),
    ];
    assert!(contains(&Coordinate::new(5.0, 5.0), &tri));
    assert!(!contains(&Coordinate::new(0.0, 10.0), &tri));
    assert!(!contains(&Coordinate::new(20.0, 5.0), &tri));
}

#[test]
fn test_concave_polygon_notch() {
    // U shape open towards high longitude
    let u = vec![
        BoundaryVertex::new(0.0, 0.0),
        BoundaryVertex::new(30.0, 0.0),
        BoundaryVertex::new(30.0, 30.0),
        BoundaryVertex::new(20.0, 30.0),
        BoundaryVertex::new(20.0, 10.0),
        BoundaryVertex::new(10.0, 10.0),
        BoundaryVertex::new(10.0, 30.0),
        BoundaryVertex::new(0.0, 30.0),
    ];
    assert!(contains(&Coordinate::new(5.0, 20.0), &u));
    assert!(contains(&Coordinate::new(25.0, 20.0), &u));
    assert!(!contains(&Coordinate::new(15.0, 20.0), &u));
    assert!(contains(&Coordinate::new(15.0, 5.0), &u));
}

#[test]
fn test_insufficient_vertices() {
    let p = Coordinate::new(5.0, 5.0);
    assert!(!contains(&p, &[]));
    assert!(!contains(&p, &[BoundaryVertex::new(0.0, 0.0)]));
    assert!(!contains(
        &p,
        &[BoundaryVertex::new(0.0, 0.0), BoundaryVertex::new(10.0, 10.0)]
    ));
}

#[test]
fn test_vertex_order_direction_irrelevant() {
    let mut reversed = square();
    reversed.reverse();
    assert!(contains(&Coordinate::new(50.0, 50.0), &reversed));
    assert!(!contains(&Coordinate::new(5.0, 5.0), &reversed));
}
