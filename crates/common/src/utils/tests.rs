use proptest::prelude::*;

use super::*;

const EPSILON: f32 = 1e-4;

#[test]
fn test_rotate_about_origin_quarter_turns() {
    let (x, y) = rotate_about_origin(1.0, 0.0, 90.0);
    assert!(approx_equal(x, 0.0, EPSILON) && approx_equal(y, 1.0, EPSILON));

    let (x, y) = rotate_about_origin(1.0, 0.0, 180.0);
    assert!(approx_equal(x, -1.0, EPSILON) && approx_equal(y, 0.0, EPSILON));

    // Negative angles turn clockwise.
    let (x, y) = rotate_about_origin(0.0, 1.0, -90.0);
    assert!(approx_equal(x, 1.0, EPSILON) && approx_equal(y, 0.0, EPSILON));
}

#[test]
fn test_rotate_about_pivot() {
    let (x, y) = rotate_about_pivot(3.0, 2.0, 2.0, 2.0, 90.0);
    assert!(approx_equal(x, 2.0, EPSILON) && approx_equal(y, 3.0, EPSILON));

    // The pivot itself never moves.
    let (x, y) = rotate_about_pivot(-4.0, 7.5, -4.0, 7.5, 123.0);
    assert!(approx_equal(x, -4.0, EPSILON) && approx_equal(y, 7.5, EPSILON));

    let p = Vec2::new(3.0, 2.0).rotate_around_point(Vec2::new(2.0, 2.0), 90.0);
    assert!(p.approx_eq(Vec2::new(2.0, 3.0), EPSILON));
}

#[test]
fn test_wrap_degrees() {
    assert_eq!(wrap_degrees(0.0), 0.0);
    assert_eq!(wrap_degrees(360.0), 0.0);
    assert!(approx_equal(wrap_degrees(-90.0), 270.0, EPSILON));
    assert!(approx_equal(wrap_degrees(725.0), 5.0, EPSILON));
    assert!(wrap_degrees(-1e-10) < 360.0);
}

#[test]
fn test_color_lerp() {
    let bg = Color::new(0.2, 0.4, 0.6, 1.0);

    assert_eq!(bg.lerp(Color::red(), 0.0), bg);
    assert_eq!(bg.lerp(Color::red(), 1.0), Color::red());

    let half = Color::black().lerp(Color::white(), 0.5);
    assert!(half.approx_eq(&Color::new(0.5, 0.5, 0.5, 1.0), EPSILON));
}

#[test]
fn test_color_rgba8() {
    let c = Color::from_rgba8([255, 0, 51, 255]);
    assert!(c.approx_eq(&Color::new(1.0, 0.0, 0.2, 1.0), EPSILON));
    assert_eq!(c.to_rgba8(), [255, 0, 51, 255]);

    // Out of range channels clamp.
    assert_eq!(Color::new(2.0, -1.0, 0.0, 1.0).to_rgba8(), [255, 0, 0, 255]);
}

#[test]
fn test_rect_from_points() {
    let rect = Rect::from_points(&[
        Vec2::new(1.0, -2.0),
        Vec2::new(-3.0, 4.0),
        Vec2::new(0.5, 0.5),
    ]);

    assert_eq!(rect.min, Vec2::new(-3.0, -2.0));
    assert_eq!(rect.max, Vec2::new(1.0, 4.0));
    assert_eq!(rect.size(), Vec2::new(4.0, 6.0));
    assert!(rect.contains_point(Vec2::new(1.0, 4.0)));
    assert!(!rect.contains_point(Vec2::new(1.1, 0.0)));
}

#[test]
fn test_size() {
    assert_eq!(Size::from_vec2_rounded(Vec2::new(9.6, 0.4)), Size::new(10, 0));
    assert!(!Size::new(10, 0).is_valid());
    assert!(Size::new(-1, 5).is_negative());
    assert_eq!(Size::new(-1, 5).area(), 0);
    assert_eq!(Size::new(4, 5).area(), 20);
}

#[test]
fn test_safe_div() {
    assert_eq!(safe_div(5.0, 0.0), 0.0);
    assert_eq!(safe_div(5.0, 2.0), 2.5);
}

#[test]
fn test_vec3_helpers() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(v.xz(), Vec2::new(1.0, 3.0));
    assert_eq!(Vec3::right().cross(Vec3::up()), Vec3::forward());
    assert_eq!(Vec3::zero().normalize_or_zero(), Vec3::zero());
    assert!(approx_equal(Vec3::new(0.0, 3.0, 4.0).normalize_or_zero().length(), 1.0, EPSILON));
}

proptest! {
    #[test]
    fn prop_rotation_round_trip(
        x in -1000.0f32..1000.0,
        y in -1000.0f32..1000.0,
        px in -1000.0f32..1000.0,
        py in -1000.0f32..1000.0,
        angle in -720.0f32..720.0,
    ) {
        let (rx, ry) = rotate_about_pivot(x, y, px, py, angle);
        let (bx, by) = rotate_about_pivot(rx, ry, px, py, -angle);
        prop_assert!(approx_equal(bx, x, 1e-2));
        prop_assert!(approx_equal(by, y, 1e-2));
    }

    #[test]
    fn prop_rotation_preserves_distance(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        angle in -360.0f32..360.0,
    ) {
        let (rx, ry) = rotate_about_origin(x, y, angle);
        let before = Vec2::new(x, y).length();
        let after = Vec2::new(rx, ry).length();
        prop_assert!(approx_equal(before, after, 1e-2));
    }
}

#[test]
fn test_componentwise_ops() {
    let mut v = Vec2::new(1.0, -2.0);
    v += Vec2::one();
    v *= 2.0;
    assert_eq!(v, Vec2::new(4.0, -2.0));
    assert_eq!(-v / 2.0, Vec2::new(-2.0, 1.0));
    assert_eq!(0.5 * v, v * Vec2::splat(0.5));

    let halfway = (Color::white() + Color::black()) * 0.5;
    assert!(halfway.approx_eq(&Color::new(0.5, 0.5, 0.5, 1.0), 1e-6));

    let edges = RectEdges::Top | RectEdges::Left;
    assert_eq!(edges.to_string(), "Top | Left");
    assert_eq!(RectEdges::empty().to_string(), "(empty)");
}
