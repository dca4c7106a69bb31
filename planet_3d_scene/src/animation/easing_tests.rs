//! Unit tests for easing.rs

use crate::animation::Easing;

const ALL: [Easing; 4] = [Easing::Linear, Easing::QuadOut, Easing::CubicOut, Easing::QuadInOut];

#[test]
fn test_endpoints_are_exact() {
    for easing in ALL {
        assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
        assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
    }
}

#[test]
fn test_input_is_clamped() {
    for easing in ALL {
        assert_eq!(easing.apply(-3.0), 0.0);
        assert_eq!(easing.apply(7.0), 1.0);
        assert_eq!(easing.apply(f32::NAN), 0.0);
    }
}

#[test]
fn test_curves_are_monotonic() {
    for easing in ALL {
        let mut last = 0.0;
        for i in 1..=100 {
            let value = easing.apply(i as f32 / 100.0);
            assert!(value >= last, "{:?} dips at step {}", easing, i);
            last = value;
        }
    }
}

#[test]
fn test_known_midpoints() {
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::QuadOut.apply(0.5), 0.75);
    assert_eq!(Easing::CubicOut.apply(0.5), 0.875);
    assert_eq!(Easing::QuadInOut.apply(0.5), 0.5);
    assert_eq!(Easing::QuadInOut.apply(0.25), 0.125);
}

#[test]
fn test_out_curves_lead_linear() {
    for t in [0.1, 0.3, 0.6, 0.9] {
        assert!(Easing::QuadOut.apply(t) > t);
        assert!(Easing::CubicOut.apply(t) > Easing::QuadOut.apply(t));
    }
}

#[test]
fn test_default_is_quad_out() {
    assert_eq!(Easing::default(), Easing::QuadOut);
}

#[test]
fn test_ron_names() {
    let easing: Easing = ron::from_str("CubicOut").unwrap();
    assert_eq!(easing, Easing::CubicOut);
}
