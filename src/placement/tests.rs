use proptest::prelude::*;
use strum::IntoEnumIterator;

use crate::common::config::Settings;
use crate::placement::resolver::visual_center_offset;
use crate::placement::{
    Direction, DirectionKind, DragSession, FrameResolver, PlacementContext, PlacementEngine,
    PlacementOutcome, RadialEvent, RadialSession, SessionResponse, WindowAction, keybinds,
};
use crate::sys::geometry::{Edges, IsWithin, Point, Rect, RectExt};
use crate::sys::screen::{ScreenId, ScreenInfo, ScreenLayout, ScreenProvider};
use crate::sys::window::{VirtualWindow, WindowHandle, WindowId, WindowSnapshot};

const W: WindowId = WindowId(42);

fn screen() -> Rect { Rect::new(0.0, 0.0, 1000.0, 800.0) }

fn engine_with(settings: Settings) -> PlacementEngine<ScreenLayout> {
    PlacementEngine::new(ScreenLayout::single(screen(), screen()), settings)
}

fn frame_of(outcome: &PlacementOutcome) -> Rect {
    match outcome {
        PlacementOutcome::Applied { frame, .. } => *frame,
        other => panic!("expected a frame, got {other:?}"),
    }
}

/// Directions whose result must land inside the bounds they are resolved
/// against.
fn bounded_directions() -> Vec<Direction> {
    DirectionKind::iter()
        .filter_map(Direction::from_kind)
        .filter(|d| !d.is_move() && !d.is_history() && !d.is_screen_switch())
        .collect()
}

mod resolver_properties {
    use super::*;

    proptest! {
        #[test]
        fn bounded_directions_stay_inside_bounds(
            bx in -2000.0f64..2000.0,
            by in -500.0f64..500.0,
            bw in 600.0f64..3000.0,
            bh in 500.0f64..2000.0,
            fx in 0.0f64..0.4,
            fy in 0.0f64..0.4,
            fw in 0.05f64..0.6,
            fh in 0.05f64..0.6,
            gap in 0.0f64..20.0,
            inset in 0.0f64..30.0,
        ) {
            let mut settings = Settings::default();
            settings.padding.window = gap;
            settings.padding.top = inset;
            settings.padding.bottom = inset;
            settings.padding.left = inset;
            settings.padding.right = inset;
            let resolver = FrameResolver::new(&settings, None);

            let bounds = Rect::new(bx, by, bw, bh);
            let window = WindowSnapshot {
                id: W,
                frame: Rect::new(bx + fx * bw, by + fy * bh, fw * bw, fh * bh),
            };
            let allowed = bounds.inset(-1e-6, -1e-6);
            for direction in bounded_directions() {
                let mut ctx = PlacementContext::new();
                let action = WindowAction::new(direction.clone());
                for is_preview in [true, false] {
                    let r = resolver.resolve(&mut ctx, &action, Some(&window), bounds, is_preview);
                    prop_assert!(allowed.contains_rect(r), "{:?} preview={} -> {:?}", direction, is_preview, r);
                }
            }
        }

        #[test]
        fn larger_then_smaller_restores_size(
            x in 100.0f64..800.0,
            y in 100.0f64..600.0,
            w in 200.0f64..900.0,
            h in 200.0f64..700.0,
            step in 5.0f64..40.0,
        ) {
            let mut settings = Settings::default();
            settings.resize.size_increment = step;
            let resolver = FrameResolver::new(&settings, None);
            let bounds = Rect::new(0.0, 0.0, 2000.0, 1500.0);
            let start = Rect::new(x, y, w, h);

            let mut ctx = PlacementContext::new();
            let larger = resolver.resolve(
                &mut ctx,
                &WindowAction::new(Direction::Larger),
                Some(&WindowSnapshot { id: W, frame: start }),
                bounds,
                false,
            );
            let smaller = resolver.resolve(
                &mut ctx,
                &WindowAction::new(Direction::Smaller),
                Some(&WindowSnapshot { id: W, frame: larger }),
                bounds,
                false,
            );
            prop_assert!(smaller.size.is_within(settings.resize.tolerance, start.size));
        }

        #[test]
        fn visual_center_offset_never_moves_down(ratio in 0.0f64..=1.0, h in 100.0f64..3000.0) {
            let offset = visual_center_offset(ratio * h, h);
            prop_assert!(offset <= 0.0);
            prop_assert!(offset.is_within(1e-9, (0.5 * ratio - 0.5) * (h / 2.0)));
        }
    }

    #[test]
    fn every_direction_resolves_without_a_window() {
        let settings = Settings::default();
        let resolver = FrameResolver::new(&settings, Some(screen()));
        for direction in bounded_directions() {
            let mut ctx = PlacementContext::new();
            let r = resolver.resolve(&mut ctx, &WindowAction::new(direction.clone()), None, screen(), true);
            assert!(screen().contains_rect(r), "{direction:?} -> {r:?}");
        }
    }
}

mod ledger_scenarios {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn previous_direction_is_one_below_the_top() {
        let mut engine = engine_with(Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(10.0, 10.0, 300.0, 200.0));
        engine.apply(&mut window, &WindowAction::new(Direction::TopHalf));
        engine.apply(&mut window, &WindowAction::new(Direction::Maximize));
        assert_eq!(engine.history().get_last_direction(W, 1, false), Direction::TopHalf);
    }

    #[test]
    fn cycling_entries_are_skipped() {
        let mut engine = engine_with(Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(10.0, 10.0, 300.0, 200.0));
        let right = WindowAction::new(Direction::CycleRight);
        engine.apply(&mut window, &right);
        engine.apply(&mut window, &right);
        // [RightThird (cycling), RightHalf, InitialFrame]
        assert!(engine.history().is_cycling(W));
        assert_eq!(engine.history().get_last_direction(W, 0, false), Direction::RightHalf);
        assert_eq!(engine.history().get_last_direction(W, 1, false), Direction::RightHalf);
        assert_eq!(engine.history().get_last_direction(W, 1, true), Direction::RightHalf);
        assert_eq!(engine.history().get_last_direction(W, 2, false), Direction::InitialFrame);
    }

    #[test]
    fn undo_after_cycling_skips_the_whole_cycle() {
        let mut engine = engine_with(Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(10.0, 10.0, 300.0, 200.0));
        engine.apply(&mut window, &WindowAction::new(Direction::Maximize));
        let left = WindowAction::new(Direction::CycleLeft);
        for _ in 0..3 {
            engine.apply(&mut window, &left);
        }
        let undone = engine.apply(&mut window, &WindowAction::new(Direction::Undo));
        assert_eq!(frame_of(&undone), screen());
        assert_eq!(engine.history().get_last_direction(W, 0, true), Direction::Maximize);
    }

    #[test]
    fn undo_skips_size_adjustments() {
        let mut engine = engine_with(Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(10.0, 10.0, 300.0, 200.0));
        engine.apply(&mut window, &WindowAction::new(Direction::LeftHalf));
        engine.apply(&mut window, &WindowAction::new(Direction::RightHalf));
        engine.begin_gesture(&window);
        engine.apply(&mut window, &WindowAction::new(Direction::Smaller));
        // the left edge is the only one off the screen edge
        assert_eq!(window.frame().unwrap(), Rect::new(520.0, 0.0, 480.0, 800.0));

        let undone = engine.apply(&mut window, &WindowAction::new(Direction::Undo));
        assert_eq!(frame_of(&undone), Rect::new(500.0, 0.0, 500.0, 800.0));
    }

    #[test]
    fn closed_windows_are_forgotten() {
        let mut engine = engine_with(Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(10.0, 10.0, 300.0, 200.0));
        engine.apply(&mut window, &WindowAction::new(Direction::TopHalf));
        engine.window_closed(W);
        assert!(engine.history().is_empty());
    }
}

mod padding {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    fn padded() -> Settings {
        let mut settings = Settings::default();
        settings.padding.window = 10.0;
        settings.padding.top = 10.0;
        settings.padding.bottom = 10.0;
        settings.padding.left = 10.0;
        settings.padding.right = 10.0;
        settings
    }

    #[test]
    fn only_interior_edges_get_the_gap() {
        let mut engine = engine_with(padded());
        let info = engine.screens().main_screen().unwrap();
        let quarter = WindowAction::new(Direction::TopLeftQuarter);

        let preview = engine.preview(None, &quarter, &info);
        assert_eq!(preview, Rect::new(0.0, 0.0, 495.0, 395.0));

        let mut window = VirtualWindow::new(W, Rect::new(300.0, 300.0, 200.0, 200.0));
        let applied = frame_of(&engine.apply(&mut window, &quarter));
        assert_eq!(applied, Rect::new(10.0, 10.0, 485.0, 385.0));
        assert_eq!(Direction::TopLeftQuarter.edges_touching_screen(), Edges::TOP | Edges::LEADING);
    }

    #[test]
    fn external_bar_pushes_the_top_down() {
        let mut settings = Settings::default();
        settings.padding.external_bar = 30.0;
        let mut engine = engine_with(settings);
        let mut window = VirtualWindow::new(W, Rect::new(300.0, 300.0, 200.0, 200.0));
        let applied = frame_of(&engine.apply(&mut window, &WindowAction::new(Direction::Maximize)));
        assert_eq!(applied, Rect::new(0.0, 30.0, 1000.0, 770.0));
    }
}

mod sessions {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn radial_selection_is_applied_on_release() {
        let mut engine = engine_with(Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(300.0, 300.0, 200.0, 200.0));
        let mut radial = RadialSession::new(engine.settings().radial_menu.clone());

        engine.begin_gesture(&window);
        radial.handle_event(RadialEvent::Open { origin: Point::new(500.0, 400.0), window: Some(W) });
        let info = engine.screens().main_screen().unwrap();
        match radial.handle_event(RadialEvent::PointerMoved(Point::new(560.0, 460.0))) {
            SessionResponse::Changed(action) => {
                assert_eq!(action.direction, Direction::BottomRightQuarter);
                let preview = engine.preview(window.snapshot().ok(), &action, &info);
                assert_eq!(preview, Rect::new(500.0, 400.0, 500.0, 400.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        let SessionResponse::Commit { action, .. } = radial.handle_event(RadialEvent::Close) else {
            panic!("expected a commit");
        };
        let outcome = engine.apply(&mut window, &action);
        assert_eq!(frame_of(&outcome), Rect::new(500.0, 400.0, 500.0, 400.0));
    }

    #[test]
    fn drag_to_bottom_centre_after_left_third_picks_two_thirds() {
        let mut engine = engine_with(Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(300.0, 300.0, 200.0, 200.0));
        let mut drag = DragSession::new(engine.settings().snapping.clone());

        drag.begin(window.snapshot().unwrap());
        assert_eq!(drag.pointer_moved(Point::new(100.0, 800.0), screen()), Some(Direction::LeftThird));
        assert_eq!(
            drag.pointer_moved(Point::new(500.0, 800.0), screen()),
            Some(Direction::LeftTwoThirds)
        );
        let (_, direction) = drag.end().unwrap();
        let frame = frame_of(&engine.apply(&mut window, &WindowAction::new(direction)));
        assert!(frame.is_within(1e-6, Rect::new(0.0, 0.0, 2000.0 / 3.0, 800.0)));
    }

    #[test]
    fn dragging_a_placed_window_restores_it() {
        let mut engine = engine_with(Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(300.0, 300.0, 200.0, 100.0));
        engine.apply(&mut window, &WindowAction::new(Direction::RightHalf));
        let restored = engine.restore_on_drag(&mut window, Point::new(750.0, 5.0)).unwrap();
        assert_eq!(restored, Rect::new(650.0, 0.0, 200.0, 100.0));
        assert!(!engine.history().has_record(W));
    }
}

mod multi_screen {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    fn layout() -> ScreenLayout {
        let main = Rect::new(0.0, 0.0, 1440.0, 900.0);
        let side = Rect::new(1440.0, -200.0, 1920.0, 1080.0);
        ScreenLayout::new(vec![
            ScreenInfo::new(ScreenId(1), main, Rect::new(0.0, 25.0, 1440.0, 875.0)),
            ScreenInfo::new(ScreenId(2), side, side),
        ])
    }

    #[test]
    fn placement_uses_the_screen_holding_the_window() {
        let mut engine = PlacementEngine::new(layout(), Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(2000.0, 0.0, 300.0, 300.0));
        let frame = frame_of(&engine.apply(&mut window, &WindowAction::new(Direction::LeftHalf)));
        assert_eq!(frame, Rect::new(1440.0, -200.0, 960.0, 1080.0));
    }

    #[test]
    fn screen_round_trip_keeps_direction() {
        let mut engine = PlacementEngine::new(layout(), Settings::default());
        let mut window = VirtualWindow::new(W, Rect::new(100.0, 100.0, 300.0, 300.0));
        engine.apply(&mut window, &WindowAction::new(Direction::TopRightQuarter));
        engine.apply(&mut window, &WindowAction::new(Direction::NextScreen));
        assert_eq!(window.frame().unwrap(), Rect::new(2400.0, -200.0, 960.0, 540.0));
        engine.apply(&mut window, &WindowAction::new(Direction::NextScreen));
        assert_eq!(window.frame().unwrap(), Rect::new(720.0, 25.0, 720.0, 437.5));
    }
}

mod keybind_files {
    use test_log::test;

    use super::*;

    #[test]
    fn defaults_survive_a_file_round_trip_and_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybinds.json");
        keybinds::save(&path, &keybinds::default_keybinds()).unwrap();
        let loaded = keybinds::load(&path).unwrap();

        let mut engine = engine_with(Settings::default());
        for action in &loaded {
            let mut window = VirtualWindow::new(W, Rect::new(100.0, 100.0, 300.0, 300.0));
            engine.window_closed(W);
            let outcome = engine.apply(&mut window, action);
            assert!(outcome.is_applied(), "{:?} -> {outcome:?}", action.direction);
        }
    }
}
