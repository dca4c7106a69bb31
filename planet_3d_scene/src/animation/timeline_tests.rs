//! Unit tests for timeline.rs

use glam::Vec3;
use crate::animation::{Easing, EntranceTimeline, Placement, Tween, TweenTarget, TweenValue};
use crate::config::{EntranceConfig, SceneConfig};
use crate::error::Error;
use crate::overlay::{Overlay, NAV, TITLE};
use crate::scene::{BuiltScene, Node, NodeKey, Scene, SceneBuilder};

fn scene_with_group() -> (Scene, NodeKey) {
    let mut scene = Scene::new();
    let root = scene.root();
    let group = scene.add_node(root, Node::group("planet")).unwrap();
    (scene, group)
}

fn built() -> BuiltScene {
    let mut config = SceneConfig::default();
    config.stars.count = 0;
    SceneBuilder::new(&config).build().unwrap()
}

fn scale(scene: &Scene, key: NodeKey) -> Vec3 {
    scene.transform(key).unwrap().scale
}

// ============================================================================
// ENTRANCE
// ============================================================================

#[test]
fn test_entrance_runs_three_entries_back_to_back() {
    let built = built();
    let timeline = EntranceTimeline::entrance(&EntranceConfig::default(), &built.nodes, &Overlay::new());
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.start_times(), vec![0.0, 1.0, 2.0]);
    assert_eq!(timeline.duration(), 3.0);
    assert!(!timeline.is_complete());
}

#[test]
fn test_first_advance_primes_start_values() {
    let mut built = built();
    let mut overlay = Overlay::new();
    let mut timeline = EntranceTimeline::entrance(&EntranceConfig::default(), &built.nodes, &overlay);

    timeline.advance(0.0, &mut built.scene, &mut overlay).unwrap();

    assert_eq!(scale(&built.scene, built.nodes.planet_group), Vec3::ZERO);
    assert_eq!(overlay.element_by_name(NAV).unwrap().offset_y_percent(), -100.0);
    assert_eq!(overlay.element_by_name(TITLE).unwrap().opacity(), 0.0);
}

#[test]
fn test_entrance_midway_is_eased() {
    let mut built = built();
    let mut overlay = Overlay::new();
    let mut timeline = EntranceTimeline::entrance(&EntranceConfig::default(), &built.nodes, &overlay);

    timeline.advance(0.5, &mut built.scene, &mut overlay).unwrap();

    // QuadOut at half time
    assert_eq!(scale(&built.scene, built.nodes.planet_group), Vec3::splat(0.75));
    assert_eq!(overlay.element_by_name(NAV).unwrap().offset_y_percent(), -100.0);
}

#[test]
fn test_entrance_ends_at_exact_rest_values() {
    let mut built = built();
    let mut overlay = Overlay::new();
    let mut timeline = EntranceTimeline::entrance(&EntranceConfig::default(), &built.nodes, &overlay);

    // Uneven steps that overshoot the end
    for _ in 0..23 {
        timeline.advance(0.137, &mut built.scene, &mut overlay).unwrap();
    }

    assert!(timeline.is_complete());
    assert_eq!(scale(&built.scene, built.nodes.planet_group), Vec3::ONE);
    assert_eq!(overlay.element_by_name(NAV).unwrap().offset_y_percent(), 0.0);
    assert_eq!(overlay.element_by_name(TITLE).unwrap().opacity(), 1.0);
}

#[test]
fn test_entrance_settles_planet_from_any_start_scale() {
    for from in [2.5, 0.3, 7.0] {
        let mut built = built();
        let mut overlay = Overlay::new();
        let config = EntranceConfig { planet_scale_from: from, ..EntranceConfig::default() };
        let mut timeline = EntranceTimeline::entrance(&config, &built.nodes, &overlay);

        timeline.advance(0.0, &mut built.scene, &mut overlay).unwrap();
        assert_eq!(scale(&built.scene, built.nodes.planet_group), Vec3::splat(from));

        for _ in 0..23 {
            timeline.advance(0.137, &mut built.scene, &mut overlay).unwrap();
        }
        assert!(timeline.is_complete());
        assert_eq!(scale(&built.scene, built.nodes.planet_group), Vec3::ONE);
    }
}

#[test]
fn test_captured_start_scale_settles_at_one() {
    let (mut scene, group) = scene_with_group();
    let mut overlay = Overlay::new();
    scene.transform_mut(group).unwrap().scale = Vec3::new(2.5, 2.5, 2.5);

    let mut timeline = EntranceTimeline::new();
    timeline.push(Tween::new(TweenTarget::NodeScale(group), TweenValue::Scalar(1.0), 1.0));

    timeline.advance(0.5, &mut scene, &mut overlay).unwrap();
    let midway = scale(&scene, group);
    assert!(midway.x < 2.5 && midway.x > 1.0);

    timeline.advance(0.7, &mut scene, &mut overlay).unwrap();
    assert!(timeline.is_complete());
    assert_eq!(scale(&scene, group), Vec3::ONE);
}

#[test]
fn test_entries_wait_for_their_start() {
    let mut built = built();
    let mut overlay = Overlay::new();
    let mut timeline = EntranceTimeline::entrance(&EntranceConfig::default(), &built.nodes, &overlay);

    timeline.advance(1.0, &mut built.scene, &mut overlay).unwrap();
    assert_eq!(scale(&built.scene, built.nodes.planet_group), Vec3::ONE);
    assert_eq!(overlay.element_by_name(NAV).unwrap().offset_y_percent(), -100.0);
    assert_eq!(overlay.element_by_name(TITLE).unwrap().opacity(), 0.0);

    timeline.advance(0.5, &mut built.scene, &mut overlay).unwrap();
    assert_eq!(overlay.element_by_name(NAV).unwrap().offset_y_percent(), -25.0);
    assert_eq!(overlay.element_by_name(TITLE).unwrap().opacity(), 0.0);
}

// ============================================================================
// PLACEMENT
// ============================================================================

#[test]
fn test_placement_offsets() {
    let (_scene, group) = scene_with_group();
    let target = TweenTarget::NodeScale(group);
    let one = TweenValue::Scalar(1.0);

    let mut timeline = EntranceTimeline::new();
    timeline.push(Tween::new(target, one, 2.0));
    timeline.push(Tween::new(target, one, 1.0).with_placement(Placement::WithPrevious(0.5)));
    timeline.push(Tween::new(target, one, 1.0));
    timeline.push(Tween::new(target, one, 1.0).with_placement(Placement::At(-3.0)));
    timeline.push(Tween::new(target, one, 0.5).with_placement(Placement::At(4.0)));

    assert_eq!(timeline.start_times(), vec![0.0, 0.5, 2.0, 0.0, 4.0]);
    assert_eq!(timeline.duration(), 4.5);
}

#[test]
fn test_empty_timeline_is_complete() {
    let (mut scene, _) = scene_with_group();
    let mut overlay = Overlay::new();
    let mut timeline = EntranceTimeline::new();
    assert!(timeline.is_empty());
    assert_eq!(timeline.duration(), 0.0);
    timeline.advance(1.0, &mut scene, &mut overlay).unwrap();
    assert!(timeline.is_complete());
}

// ============================================================================
// VALUES
// ============================================================================

#[test]
fn test_missing_from_captures_current_value() {
    let (mut scene, _) = scene_with_group();
    let mut overlay = Overlay::new();
    let title = overlay.find(TITLE).unwrap();
    overlay.set_opacity(title, 0.6).unwrap();

    let mut timeline = EntranceTimeline::new();
    timeline.push(
        Tween::new(TweenTarget::OverlayOpacity(title), TweenValue::Scalar(0.0), 1.0)
            .with_easing(Easing::Linear),
    );
    timeline.advance(0.5, &mut scene, &mut overlay).unwrap();

    assert!((overlay.element(title).unwrap().opacity() - 0.3).abs() < 1e-6);
}

#[test]
fn test_vector_scale_tween() {
    let (mut scene, group) = scene_with_group();
    let mut overlay = Overlay::new();

    let mut timeline = EntranceTimeline::new();
    timeline.push(
        Tween::new(TweenTarget::NodeScale(group), TweenValue::Vector(Vec3::new(2.0, 4.0, 6.0)), 2.0)
            .from_value(TweenValue::Scalar(0.0))
            .with_easing(Easing::Linear),
    );
    timeline.advance(1.0, &mut scene, &mut overlay).unwrap();
    assert_eq!(scale(&scene, group), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_zero_duration_jumps_to_end() {
    let (mut scene, group) = scene_with_group();
    let mut overlay = Overlay::new();

    let mut timeline = EntranceTimeline::new();
    timeline.push(Tween::new(TweenTarget::NodeScale(group), TweenValue::Scalar(3.0), 0.0));
    timeline.advance(0.0, &mut scene, &mut overlay).unwrap();

    assert!(timeline.is_complete());
    assert_eq!(scale(&scene, group), Vec3::splat(3.0));
}

#[test]
fn test_invalid_dt_does_not_move_clock() {
    let (mut scene, group) = scene_with_group();
    let mut overlay = Overlay::new();

    let mut timeline = EntranceTimeline::new();
    timeline.push(Tween::new(TweenTarget::NodeScale(group), TweenValue::Scalar(2.0), 1.0));
    for dt in [-1.0, f32::NAN, f32::INFINITY] {
        timeline.advance(dt, &mut scene, &mut overlay).unwrap();
    }
    assert_eq!(timeline.elapsed(), 0.0);
    assert_eq!(scale(&scene, group), Vec3::ONE);
}

#[test]
fn test_removed_target_is_an_error() {
    let (mut scene, group) = scene_with_group();
    let mut overlay = Overlay::new();

    let mut timeline = EntranceTimeline::new();
    timeline.push(Tween::new(TweenTarget::NodeScale(group), TweenValue::Scalar(2.0), 1.0));
    scene.remove_node(group).unwrap();

    let result = timeline.advance(0.1, &mut scene, &mut overlay);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}
