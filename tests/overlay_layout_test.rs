mod common;

use common::{assert_close, map_view, Pin};
use std::{cell::RefCell, rc::Rc};
use tileview::{
    AnchorSpec, Bounds, CoordinateTranslater, EventHandled, InputEvent, OverlayKind,
    OverlayState, Point, Size,
};

/// Overlay placement as seen by the host container
#[cfg(test)]
mod overlay_layout_tests {
    use super::*;

    /// Bottom-centre anchoring of a 40x20 marker in the middle of the content
    #[test]
    fn test_default_anchor_places_bottom_center_on_coordinate() {
        let mut map = map_view();
        let handle = map.add_marker(Pin::new(1, 40.0, 20.0), 0.5, 0.5, AnchorSpec::default());

        assert_eq!(
            map.host().frames[&1],
            Bounds::from_coords(480.0, 480.0, 520.0, 500.0)
        );
        assert_eq!(map.layout().position_of(handle), Some(Point::new(480.0, 480.0)));
        assert_eq!(map.layout().state_of(handle), Some(OverlayState::Positioned));
    }

    #[test]
    fn test_frames_follow_scroll_and_scale() {
        let mut map = map_view();
        map.add_marker(Pin::new(1, 40.0, 20.0), 0.5, 0.5, AnchorSpec::default());

        map.scroll_to(100.0, 200.0);
        assert_eq!(
            map.host().frames[&1],
            Bounds::from_coords(380.0, 280.0, 420.0, 300.0)
        );

        // overlays keep their natural size while the content scales
        map.set_scale(2.0).unwrap();
        assert_eq!(
            map.host().frames[&1],
            Bounds::from_coords(880.0, 780.0, 920.0, 800.0)
        );
    }

    #[test]
    fn test_last_move_wins() {
        let mut map = map_view();
        let handle = map.add_marker(Pin::new(1, 10.0, 10.0), 0.1, 0.1, AnchorSpec::top_left());

        map.move_marker(handle, 0.2, 0.3);
        map.move_marker(handle, 0.7, 0.4);

        assert_eq!(map.layout().relative_position_of(handle), Some(Point::new(0.7, 0.4)));
        assert_eq!(
            map.host().frames[&1],
            Bounds::from_coords(700.0, 400.0, 710.0, 410.0)
        );
    }

    #[test]
    fn test_double_removal_is_a_no_op() {
        let mut map = map_view();
        let keep = map.add_marker(Pin::new(1, 10.0, 10.0), 0.1, 0.1, AnchorSpec::default());
        let gone = map.add_marker(Pin::new(2, 10.0, 10.0), 0.2, 0.2, AnchorSpec::default());

        assert_eq!(map.remove_marker(gone), Some(Pin::new(2, 10.0, 10.0)));
        assert_eq!(map.remove_marker(gone), None);

        assert_eq!(map.host().detached, vec![2]);
        assert_eq!(map.layout().markers(), vec![keep]);
        assert_eq!(map.layout().state_of(gone), Some(OverlayState::Removed));

        // moving a removed marker changes nothing
        map.move_marker(gone, 0.9, 0.9);
        assert!(!map.host().frames.contains_key(&2));
    }

    #[test]
    fn test_overlapping_tap_picks_most_recent() {
        let mut map = map_view();
        let below = map.add_marker(Pin::new(1, 60.0, 60.0), 0.1, 0.1, AnchorSpec::top_left());
        let above = map.add_callout(Pin::new(2, 60.0, 60.0), 0.13, 0.13, AnchorSpec::top_left());

        assert_eq!(map.get_marker_from_position(140.0, 140.0), Some(above));
        assert_eq!(map.get_marker_from_position(110.0, 110.0), Some(below));
        assert_eq!(map.get_marker_from_position(250.0, 250.0), None);

        map.scroll_to(100.0, 100.0);
        assert_eq!(map.get_marker_from_position(40.0, 40.0), Some(above));
    }

    #[test]
    fn test_markers_and_callouts_are_separate() {
        let mut map = map_view();
        let marker = map.add_marker(Pin::new(1, 10.0, 10.0), 0.1, 0.1, AnchorSpec::default());
        let callout = map.add_callout(Pin::new(2, 10.0, 10.0), 0.1, 0.1, AnchorSpec::default());

        assert_eq!(map.layout().kind_of(callout), Some(OverlayKind::Callout));
        assert_eq!(map.remove_callout(marker), None);
        assert_eq!(map.remove_marker(callout), None);
        assert_eq!(map.layout().len(), 2);

        assert_eq!(map.layout_mut().clear_callouts(), 1);
        assert_eq!(map.layout().markers(), vec![marker]);
    }

    #[test]
    fn test_custom_bounds_place_markers() {
        let mut map = map_view();
        map.define_bounds(-180.0, 90.0, 180.0, -90.0).unwrap();
        map.add_marker(Pin::new(1, 10.0, 10.0), 0.0, 0.0, AnchorSpec::top_left());
        assert_eq!(map.host().frames[&1].min, Point::new(500.0, 500.0));

        // redefining the space re-places existing overlays
        map.define_bounds(0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(map.host().frames[&1].min, Point::new(0.0, 0.0));

        map.set_content_size(Size::new(2000.0, 500.0)).unwrap();
        let handle = map.layout().markers()[0];
        map.layout_mut()
            .set_anchor(handle, AnchorSpec::top_left().with_absolute(5.0, 5.0));
        assert_eq!(map.host().frames[&1].min, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_translate_round_trip() {
        let mut translater = CoordinateTranslater::new(Size::new(4096.0, 2048.0)).unwrap();
        translater.define_bounds(-180.0, 85.0, 180.0, -85.0).unwrap();

        for &(x, y) in &[(-122.4, 37.7), (0.0, 0.0), (151.2, -33.8)] {
            for &scale in &[0.25, 1.0, 3.0] {
                let pixel = translater.translate(&Point::new(x, y), scale);
                let back = translater.untranslate(&pixel, scale);
                assert_close(back.x, x);
                assert_close(back.y, y);
            }
        }
    }

    #[test]
    fn test_tap_listener_observes_without_consuming() {
        let mut map = map_view();
        let handle = map.add_marker(Pin::new(1, 40.0, 20.0), 0.5, 0.5, AnchorSpec::default());
        map.scroll_to_and_center(500.0, 500.0);

        let taps = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&taps);
        map.set_marker_tap_listener(move |tap| {
            seen.borrow_mut().push(*tap);
            Ok(())
        });

        let tap = InputEvent::Tap {
            position: Point::new(200.0, 140.0),
        };
        assert_eq!(map.handle_input(&tap).unwrap(), EventHandled::NotHandled);

        let miss = InputEvent::Tap {
            position: Point::new(10.0, 10.0),
        };
        assert_eq!(map.handle_input(&miss).unwrap(), EventHandled::NotHandled);

        let taps = taps.borrow();
        assert_eq!(taps.len(), 1);
        assert_eq!(taps[0].handle, handle);
        assert_close(taps[0].relative.x, 0.5);
        assert_close(taps[0].relative.y, 0.49);
    }

    #[test]
    fn test_pinch_keeps_marker_under_focus() {
        let mut map = map_view();
        map.add_marker(Pin::new(1, 40.0, 20.0), 0.5, 0.5, AnchorSpec::default());
        map.scroll_to_and_center(500.0, 500.0);
        let before = map.host().frames[&1];

        let pinch = InputEvent::Scale {
            scale: 2.0,
            focus: Point::new(200.0, 150.0),
        };
        assert_eq!(map.handle_input(&pinch).unwrap(), EventHandled::Handled);

        assert_eq!(map.scale(), 2.0);
        assert_eq!(map.host().frames[&1], before);
    }
}
