//! Transform and TransformSystem tests
//!
//! Tests for:
//! - Pose to matrix conversion
//! - Transform dirty checking and world composition
//! - Normal matrix
//! - Hierarchical matrix propagation over the node arena

use std::f32::consts::FRAC_PI_2;

use glam::{Affine3A, EulerRot, Mat3, Quat, Vec3};
use marionette::animation::Pose;
use marionette::scene::NodeKey;
use marionette::scene::node::Node;
use marionette::scene::transform::Transform;
use marionette::scene::transform_system::*;
use slotmap::SlotMap;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Pose
// ============================================================================

#[test]
fn pose_default_is_identity() {
    let pose = Pose::default();
    assert_eq!(pose.translation, Vec3::ZERO);
    assert_eq!(pose.rotation, Vec3::ZERO);
    assert_eq!(pose.scale, Vec3::ONE);
    assert_eq!(pose.to_matrix(), Affine3A::IDENTITY);
}

#[test]
fn pose_matrix_applies_scale_rotate_translate() {
    let pose = Pose::new(
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(0.0, FRAC_PI_2, 0.0),
        Vec3::splat(2.0),
    );
    let m = pose.to_matrix();

    // +X scaled to 2, rotated 90° about Y to -Z, then translated.
    let p = m.transform_point3(Vec3::X);
    assert!(vec3_approx(p, Vec3::new(1.0, 2.0, 1.0)));
}

#[test]
fn pose_quat_uses_xyz_order() {
    let pose = Pose::IDENTITY.with_rotation(Vec3::new(0.3, -0.7, 1.1));
    let expected = Quat::from_euler(EulerRot::XYZ, 0.3, -0.7, 1.1);
    assert!(pose.quat().abs_diff_eq(expected, EPSILON));
}

#[test]
fn pose_lerp_endpoints() {
    let a = Pose::from_translation(Vec3::new(-1.0, 0.0, 0.0));
    let b = Pose::new(Vec3::new(3.0, 4.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::splat(5.0));
    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 1.0), b);

    let mid = a.lerp(&b, 0.5);
    assert!(vec3_approx(mid.translation, Vec3::new(1.0, 2.0, 0.0)));
    assert!(vec3_approx(mid.rotation, Vec3::new(0.0, 0.5, 0.0)));
    assert!(vec3_approx(mid.scale, Vec3::splat(3.0)));
}

// ============================================================================
// Transform Unit Tests
// ============================================================================

#[test]
fn transform_update_local_matrix_dirty_check() {
    let mut t = Transform::new();

    // First call always rebuilds.
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.pose.translation = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
}

#[test]
fn transform_root_world_equals_local_exactly() {
    let pose = Pose::new(Vec3::new(4.0, -1.0, 2.5), Vec3::new(0.2, 0.4, 0.6), Vec3::new(1.0, 2.0, 0.5));
    let mut t = Transform::from_pose(pose);
    t.compose(None);
    assert_eq!(*t.world_matrix(), pose.to_matrix());
}

#[test]
fn transform_compose_with_parent() {
    let parent = Affine3A::from_translation(Vec3::new(1.0, 0.0, 0.0));
    let mut t = Transform::from_pose(Pose::from_translation(Vec3::new(2.0, 0.0, 0.0)));
    let world = *t.compose(Some(&parent));
    assert!(vec3_approx(world.translation.into(), Vec3::new(3.0, 0.0, 0.0)));
}

#[test]
fn transform_compose_parent_rotation_moves_child() {
    let parent = Pose::IDENTITY.with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)).to_matrix();
    let mut t = Transform::from_pose(Pose::from_translation(Vec3::X));
    let world = *t.compose(Some(&parent));
    assert!(vec3_approx(world.translation.into(), Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn transform_compose_picks_up_pose_change() {
    let mut t = Transform::new();
    t.compose(None);
    t.set_pose(Pose::from_translation(Vec3::Y));
    t.compose(None);
    assert!(vec3_approx(t.world_matrix().translation.into(), Vec3::Y));
    assert_eq!(t.translation(), Vec3::Y);
}

#[test]
fn normal_matrix_of_uniform_scale_is_rotation_over_scale() {
    let mut t = Transform::from_pose(Pose::IDENTITY.with_scale(Vec3::splat(2.0)));
    t.compose(None);
    let n = t.normal_matrix();
    assert!(n.abs_diff_eq(Mat3::from_diagonal(Vec3::splat(0.5)), EPSILON));
}

#[test]
fn normal_matrix_keeps_normals_perpendicular_under_non_uniform_scale() {
    let mut t = Transform::from_pose(Pose::IDENTITY.with_scale(Vec3::new(4.0, 1.0, 1.0)));
    t.compose(None);

    // Tangent and normal of a 45° plane.
    let tangent = Vec3::new(1.0, 1.0, 0.0);
    let normal = Vec3::new(1.0, -1.0, 0.0);

    let world_tangent = t.world_matrix().transform_vector3(tangent);
    let world_normal = t.normal_matrix() * normal;
    assert!(approx_eq(world_tangent.dot(world_normal), 0.0));
}

#[test]
fn normal_matrix_small_scale_keeps_rotation() {
    let pose = Pose::IDENTITY
        .with_rotation(Vec3::new(0.0, 1.0, 0.0))
        .with_scale(Vec3::splat(0.004));
    let mut t = Transform::from_pose(pose);
    t.compose(None);

    let expected = Mat3::from_quat(pose.quat()) * (1.0 / 0.004);
    let n = t.normal_matrix();
    assert_ne!(n, Mat3::IDENTITY);
    assert!(n.abs_diff_eq(expected, 1e-2));

    // Normals keep their direction after renormalising.
    let dir = (n * Vec3::X).normalize();
    assert!(vec3_approx(dir, pose.quat() * Vec3::X));
}

#[test]
fn normal_matrix_degenerate_scale_is_identity() {
    let mut t = Transform::from_pose(Pose::IDENTITY.with_scale(Vec3::new(1.0, 0.0, 1.0)));
    t.compose(None);
    assert_eq!(t.normal_matrix(), Mat3::IDENTITY);
}

// ============================================================================
// Hierarchy
// ============================================================================

fn chain(nodes: &mut SlotMap<NodeKey, Node>, offsets: &[Vec3]) -> Vec<NodeKey> {
    let mut keys: Vec<NodeKey> = Vec::new();
    for &offset in offsets {
        let key = nodes.insert(Node::with_pose(Pose::from_translation(offset)));
        if let Some(&parent) = keys.last() {
            link(nodes, key, parent);
        }
        keys.push(key);
    }
    keys
}

#[test]
fn hierarchy_chain_accumulates_translation() {
    let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();
    let keys = chain(&mut nodes, &[Vec3::X, Vec3::Y, Vec3::Z, Vec3::X]);

    let r = roots(&nodes);
    update_hierarchy_iterative(&mut nodes, &r);

    let leaf = nodes[keys[3]].world_matrix().translation;
    assert!(vec3_approx(leaf.into(), Vec3::new(2.0, 1.0, 1.0)));
}

#[test]
fn hierarchy_parent_world_reads_cached_matrix() {
    let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();
    let keys = chain(&mut nodes, &[Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)]);
    let r = roots(&nodes);
    update_hierarchy_iterative(&mut nodes, &r);

    assert!(parent_world(&nodes, keys[0]).is_none());
    let pw = parent_world(&nodes, keys[1]).unwrap();
    assert!(vec3_approx(pw.translation.into(), Vec3::new(1.0, 0.0, 0.0)));
}

#[test]
fn hierarchy_roots_excludes_children() {
    let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();
    let a = chain(&mut nodes, &[Vec3::ZERO, Vec3::ZERO]);
    let b = nodes.insert(Node::new());

    let r = roots(&nodes);
    assert_eq!(r.len(), 2);
    assert!(r.contains(&a[0]));
    assert!(r.contains(&b));
    assert!(!r.contains(&a[1]));
}

#[test]
fn hierarchy_children_listed_on_parent() {
    let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();
    let parent = nodes.insert(Node::new());
    let c1 = nodes.insert(Node::new());
    let c2 = nodes.insert(Node::new());
    link(&mut nodes, c1, parent);
    link(&mut nodes, c2, parent);

    assert_eq!(nodes[parent].children(), &[c1, c2]);
    assert_eq!(nodes[c2].parent(), Some(parent));
}

#[test]
fn cycle_detection_walks_the_parent_chain() {
    let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();
    let keys = chain(&mut nodes, &[Vec3::ZERO, Vec3::ZERO, Vec3::ZERO]);

    // Attaching the root under its grandchild would close a loop.
    assert!(is_ancestor_or_self(&nodes, keys[0], keys[2]));
    assert!(!is_ancestor_or_self(&nodes, keys[2], keys[0]));
}
