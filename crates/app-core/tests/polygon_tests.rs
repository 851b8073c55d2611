use app_core::polygon::ShapePolygon;
use glam::Vec2;

#[test]
fn regular_polygon_starts_pointing_up() {
    let center = Vec2::new(200.0, 200.0);
    let poly = ShapePolygon::regular(center, 120.0, 5);
    assert_eq!(poly.len(), 5);
    let top = poly.vertex(0).unwrap().pos;
    assert!((top.x - 200.0).abs() < 1e-3);
    assert!((top.y - 80.0).abs() < 1e-3);
}

#[test]
fn insert_keeps_cyclic_order() {
    let mut poly = ShapePolygon::regular(Vec2::ZERO, 100.0, 3);
    let before = poly.positions();
    let midpoint = (before[0] + before[1]) * 0.5;
    poly.insert_at(1, midpoint);

    let after = poly.positions();
    assert_eq!(after.len(), 4);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], midpoint);
    assert_eq!(after[2], before[1]);
    assert_eq!(after[3], before[2]);
}

#[test]
fn inserted_vertices_start_fresh() {
    let mut poly = ShapePolygon::regular(Vec2::ZERO, 100.0, 3);
    poly.insert_at(1, Vec2::new(10.0, 10.0));
    assert_eq!(poly.vertex(1).unwrap().age, 0.0);
    assert!(poly.vertex(0).unwrap().age > 100.0, "seeded vertices are settled");
}

#[test]
fn removal_stops_at_three_vertices() {
    let mut poly = ShapePolygon::regular(Vec2::ZERO, 100.0, 4);
    assert!(poly.try_remove(1));
    assert_eq!(poly.len(), 3);
    assert!(!poly.try_remove(0));
    assert_eq!(poly.len(), 3);
    assert!(!poly.try_remove(99));
}

#[test]
fn age_all_advances_every_vertex() {
    let mut poly = ShapePolygon::regular(Vec2::ZERO, 100.0, 3);
    poly.insert_at(1, Vec2::new(5.0, 5.0));
    poly.age_all(0.5);
    assert_eq!(poly.vertex(1).unwrap().age, 0.5);
}
