//! Unit tests for overlay.rs

use crate::error::Error;
use crate::overlay::*;

#[test]
fn test_new_overlay_is_at_rest() {
    let overlay = Overlay::new();
    assert_eq!(overlay.elements().len(), 2);
    for name in [NAV, TITLE] {
        let element = overlay.element_by_name(name).unwrap();
        assert_eq!(element.name(), name);
        assert_eq!(element.offset_y_percent(), 0.0);
        assert_eq!(element.opacity(), 1.0);
    }
    assert!(!overlay.menu().is_active());
}

#[test]
fn test_add_element_is_idempotent_by_name() {
    let mut overlay = Overlay::default();
    let footer = overlay.add_element("footer");
    assert_eq!(overlay.add_element("footer"), footer);
    assert_eq!(overlay.find(NAV), overlay.find(NAV));
    assert_eq!(overlay.elements().len(), 3);
    assert!(overlay.find("missing").is_none());
}

#[test]
fn test_setters_update_the_named_element() {
    let mut overlay = Overlay::new();
    let nav = overlay.find(NAV).unwrap();
    let title = overlay.find(TITLE).unwrap();

    overlay.set_offset_y(nav, -100.0).unwrap();
    overlay.set_opacity(title, 0.25).unwrap();

    assert_eq!(overlay.element(nav).unwrap().offset_y_percent(), -100.0);
    assert_eq!(overlay.element(nav).unwrap().opacity(), 1.0);
    assert_eq!(overlay.element(title).unwrap().opacity(), 0.25);
}

#[test]
fn test_opacity_is_clamped() {
    let mut overlay = Overlay::new();
    let title = overlay.find(TITLE).unwrap();
    overlay.set_opacity(title, 1.5).unwrap();
    assert_eq!(overlay.element(title).unwrap().opacity(), 1.0);
    overlay.set_opacity(title, -0.5).unwrap();
    assert_eq!(overlay.element(title).unwrap().opacity(), 0.0);
}

#[test]
fn test_unknown_id_is_rejected() {
    let mut overlay = Overlay::new();
    let bogus = OverlayElementId(42);
    assert!(matches!(overlay.set_opacity(bogus, 0.5), Err(Error::InvalidResource(_))));
    assert!(matches!(overlay.set_offset_y(bogus, 0.0), Err(Error::InvalidResource(_))));
    assert!(overlay.element(bogus).is_none());
}

#[test]
fn test_menu_toggle_flips_class() {
    let mut overlay = Overlay::new();
    assert_eq!(overlay.menu().class_name(), "");

    assert!(overlay.menu_mut().toggle());
    assert_eq!(overlay.menu().class_name(), "active");

    assert!(!overlay.menu_mut().toggle());
    assert_eq!(overlay.menu().class_name(), "");
}
