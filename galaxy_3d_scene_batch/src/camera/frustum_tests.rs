use glam::{Mat4, Vec3};
use crate::scene::AABB;
use super::*;

fn forward_frustum(far: f32) -> Frustum {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, far);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_view_projection(&(projection * view))
}

fn cube(center: Vec3, half: f32) -> AABB {
    AABB::from_center_half_size(center, Vec3::splat(half))
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_planes_are_normalized() {
    let ortho = Frustum::from_view_projection(&Mat4::orthographic_rh(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0));

    for frustum in [forward_frustum(100.0), ortho] {
        for plane in &frustum.planes {
            assert!((plane.truncate().length() - 1.0).abs() < 1e-4, "plane normal should be unit length");
        }
    }
}

#[test]
fn test_near_and_far_distances() {
    let frustum = forward_frustum(100.0);

    // Camera at z=5 looking down -Z: a point at the origin is 5 units in front
    assert!(frustum.distance(PLANE_NEAR, Vec3::ZERO) > 0.0);
    assert!(frustum.distance(PLANE_FAR, Vec3::ZERO) > 0.0);
    assert!(frustum.distance(PLANE_NEAR, Vec3::new(0.0, 0.0, 10.0)) < 0.0);
    assert!(frustum.distance(PLANE_FAR, Vec3::new(0.0, 0.0, -200.0)) < 0.0);
}

#[test]
fn test_contains_point() {
    let frustum = forward_frustum(100.0);

    assert!(frustum.contains_point(Vec3::ZERO));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 20.0)));
    assert!(!frustum.contains_point(Vec3::new(50.0, 0.0, 0.0)));
}

// ============================================================================
// Frustum::from_perspective
// ============================================================================

#[test]
fn test_from_perspective_matches_look_to() {
    let frustum = Frustum::from_perspective(
        Vec3::new(0.0, 10.0, 0.0),
        Vec3::NEG_Y,
        std::f32::consts::FRAC_PI_4,
        1.0,
        0.1,
        20.0,
    );

    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 0.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 20.0, 0.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, -15.0, 0.0)));
}

#[test]
fn test_from_perspective_zero_direction_falls_back() {
    let frustum = Frustum::from_perspective(Vec3::ZERO, Vec3::ZERO, 1.0, 1.0, 0.1, 10.0);

    // Default forward is -Z
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -5.0)));
}

// ============================================================================
// Frustum::intersects_aabb / classify_aabb
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let frustum = forward_frustum(100.0);
    let aabb = cube(Vec3::ZERO, 0.5);

    assert!(frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Inside);
}

#[test]
fn test_aabb_behind_camera() {
    let frustum = forward_frustum(100.0);
    let aabb = cube(Vec3::new(0.0, 0.0, 20.0), 1.0);

    assert!(!frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Outside);
}

#[test]
fn test_aabb_beyond_far_plane() {
    let frustum = forward_frustum(10.0);
    let aabb = cube(Vec3::new(0.0, 0.0, -50.0), 1.0);

    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Outside);
}

#[test]
fn test_aabb_straddling_near_plane_is_partial() {
    let frustum = forward_frustum(100.0);
    let aabb = cube(Vec3::new(0.0, 0.0, 5.0), 2.0);

    assert!(frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Partial);
}

#[test]
fn test_huge_aabb_enclosing_frustum_is_partial() {
    let frustum = forward_frustum(10.0);
    let aabb = cube(Vec3::ZERO, 1000.0);

    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Partial);
}
