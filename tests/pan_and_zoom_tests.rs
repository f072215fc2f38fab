use approx::assert_abs_diff_eq;
use indexmap::IndexSet;
use trace_timeline::api::{
    Action, DragMode, PanAndZoomHandler, PanAndZoomSettings, TimelineConfig, ViewportContext,
    WheelOutcome,
};
use trace_timeline::core::{TimeSpan, Viewport};
use trace_timeline::interaction::{
    CursorStyle, ElementRect, GestureEnd, Key, Modifiers, PointerEvent, SelectionEdge, WheelEvent,
};
use trace_timeline::overlay::Area;
use trace_timeline::panel::{PanelDragBehavior, TrackId, TrackLocator};

/// Every 100px band of canvas height is one track.
struct Bands;

impl TrackLocator for Bands {
    fn tracks_in_vertical_range(&self, top: f64, bottom: f64) -> IndexSet<TrackId> {
        let (low, high) = (top.min(bottom), top.max(bottom));
        let first = (low / 100.0).floor() as u32;
        let last = (high / 100.0).floor() as u32;
        (first..=last).map(TrackId::new).collect()
    }
}

fn setup() -> (ViewportContext, PanAndZoomHandler) {
    let config = TimelineConfig::new(Viewport::new(1000, 600), 0.0, 100.0).with_shell_width(100.0);
    let viewport = ViewportContext::new(&config).expect("viewport init");
    let handler = PanAndZoomHandler::new(
        PanAndZoomSettings::from_config(&config),
        ElementRect::new(0.0, 0.0, 1000.0, 600.0),
    );
    (viewport, handler)
}

fn drag(
    handler: &mut PanAndZoomHandler,
    viewport: &mut ViewportContext,
    path: &[(f64, f64)],
    modifiers: Modifiers,
) -> (GestureEnd, Vec<Action>) {
    let mut actions = Vec::new();
    let (x0, y0) = path[0];
    handler.on_mouse_down(
        &PointerEvent::pressed(x0, y0).with_modifiers(modifiers),
        PanelDragBehavior::Timeline,
    );
    for &(x, y) in &path[1..] {
        handler.on_mouse_move(&PointerEvent::pressed(x, y), viewport, &Bands, &mut actions);
    }
    let (xn, yn) = path[path.len() - 1];
    let end = handler.on_mouse_up(&PointerEvent::released(xn, yn), viewport, &Bands, &mut actions);
    (end, actions)
}

#[test]
fn plain_drag_pans_the_window() {
    let (mut viewport, mut handler) = setup();
    viewport.set_visible_window(TimeSpan::new(20.0, 40.0));

    let (end, actions) = drag(
        &mut handler,
        &mut viewport,
        &[(550.0, 300.0), (555.0, 300.0), (640.0, 300.0)],
        Modifiers::none(),
    );

    assert_eq!(end, GestureEnd::DragFinished);
    assert!(actions.is_empty());
    let visible = viewport.visible_window();
    assert_abs_diff_eq!(visible.start(), 18.0, epsilon = 1e-9);
    assert_abs_diff_eq!(visible.end(), 38.0, epsilon = 1e-9);
    assert_eq!(handler.drag_mode(), DragMode::Idle);
}

#[test]
fn shift_drag_selects_area_and_tracks() {
    let (mut viewport, mut handler) = setup();

    let (end, actions) = drag(
        &mut handler,
        &mut viewport,
        &[(300.0, 50.0), (305.0, 50.0), (550.0, 250.0)],
        Modifiers::shift(),
    );

    assert_eq!(end, GestureEnd::DragFinished);
    let area = viewport.selected_area().expect("area selected");
    assert_abs_diff_eq!(area.start_sec, 200.0 / 9.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.end_sec, 50.0, epsilon = 1e-9);
    let tracks: Vec<_> = area.track_ids.iter().copied().collect();
    assert_eq!(tracks, vec![TrackId::new(0), TrackId::new(1), TrackId::new(2)]);
    assert_eq!(actions, vec![Action::SelectArea { area: area.clone() }]);
}

#[test]
fn single_move_shift_drag_replaces_previous_selection() {
    let (mut viewport, mut handler) = setup();
    viewport.set_selected_area(Some(Area::new(10.0, 20.0)));

    let (end, actions) = drag(
        &mut handler,
        &mut viewport,
        &[(500.0, 50.0), (800.0, 50.0)],
        Modifiers::shift(),
    );

    assert_eq!(end, GestureEnd::DragFinished);
    let area = viewport.selected_area().expect("area selected");
    assert_abs_diff_eq!(area.start_sec, 400.0 / 9.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.end_sec, 700.0 / 9.0, epsilon = 1e-9);
    assert_eq!(actions, vec![Action::SelectArea { area: area.clone() }]);
}

#[test]
fn single_move_plain_drag_pans() {
    let (mut viewport, mut handler) = setup();
    viewport.set_visible_window(TimeSpan::new(20.0, 40.0));

    let (_, actions) = drag(
        &mut handler,
        &mut viewport,
        &[(500.0, 50.0), (800.0, 50.0)],
        Modifiers::none(),
    );

    assert!(actions.is_empty());
    let visible = viewport.visible_window();
    assert_abs_diff_eq!(visible.start(), 20.0 - 300.0 / 45.0, epsilon = 1e-9);
    assert_abs_diff_eq!(visible.duration(), 20.0, epsilon = 1e-9);
}

#[test]
fn area_select_mode_makes_plain_drag_select() {
    let (mut viewport, mut handler) = setup();
    handler.set_area_select_mode(true);

    let (_, actions) = drag(
        &mut handler,
        &mut viewport,
        &[(700.0, 50.0), (695.0, 50.0), (400.0, 50.0)],
        Modifiers::none(),
    );

    let area = viewport.selected_area().expect("area selected");
    assert!(area.start_sec < area.end_sec);
    assert_eq!(actions.len(), 1);
    assert!(viewport.visible_window().approx_eq(TimeSpan::new(0.0, 100.0)));
}

#[test]
fn area_selection_is_clamped_to_time_area() {
    let (mut viewport, mut handler) = setup();

    drag(
        &mut handler,
        &mut viewport,
        &[(300.0, 50.0), (290.0, 50.0), (20.0, 50.0)],
        Modifiers::shift(),
    );

    let area = viewport.selected_area().expect("area selected");
    assert_abs_diff_eq!(area.start_sec, 0.0, epsilon = 1e-9);
}

#[test]
fn grabbing_selection_edge_edits_boundary() {
    let (mut viewport, mut handler) = setup();
    viewport.set_selected_area(Some(Area::new(20.0, 40.0)));

    let (end, actions) = drag(
        &mut handler,
        &mut viewport,
        &[(281.0, 50.0), (285.0, 50.0), (190.0, 50.0)],
        Modifiers::none(),
    );

    assert_eq!(end, GestureEnd::DragFinished);
    let area = viewport.selected_area().expect("area kept");
    assert_abs_diff_eq!(area.start_sec, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.end_sec, 40.0, epsilon = 1e-9);
    assert!(matches!(actions.as_slice(), [Action::SelectArea { .. }]));
}

#[test]
fn edited_edge_stops_at_opposite_edge() {
    let (mut viewport, mut handler) = setup();
    viewport.set_selected_area(Some(Area::new(20.0, 40.0)));

    let mut actions = Vec::new();
    handler.on_mouse_down(&PointerEvent::pressed(281.0, 50.0), PanelDragBehavior::Timeline);
    handler.on_mouse_move(&PointerEvent::pressed(285.0, 50.0), &mut viewport, &Bands, &mut actions);
    assert_eq!(
        handler.drag_mode(),
        DragMode::EditBoundary {
            edge: SelectionEdge::Start,
            fixed_time: 40.0
        }
    );
    handler.on_mouse_move(&PointerEvent::pressed(900.0, 50.0), &mut viewport, &Bands, &mut actions);

    let area = viewport.selected_area().expect("area kept");
    assert_abs_diff_eq!(area.start_sec, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.end_sec, 40.0, epsilon = 1e-9);
}

#[test]
fn click_returns_click_without_actions() {
    let (mut viewport, mut handler) = setup();

    let (end, actions) = drag(&mut handler, &mut viewport, &[(400.0, 50.0)], Modifiers::none());

    assert_eq!(
        end,
        GestureEnd::Click {
            client_x: 400.0,
            client_y: 50.0
        }
    );
    assert!(actions.is_empty());
}

#[test]
fn ctrl_wheel_zooms_around_pointer() {
    let (mut viewport, mut handler) = setup();
    let anchor_time = viewport.time_scale().px_to_time(325.0);

    let outcome = handler.on_wheel(
        &WheelEvent::new(325.0, 50.0, 0.0, -10.0).with_modifiers(Modifiers::ctrl()),
        &mut viewport,
    );

    assert_eq!(outcome, WheelOutcome::Zoomed);
    assert!(viewport.visible_window().duration() < 100.0);
    assert_abs_diff_eq!(viewport.time_scale().px_to_time(325.0), anchor_time, epsilon = 1e-9);
}

#[test]
fn ctrl_wheel_down_zooms_out() {
    let (mut viewport, mut handler) = setup();
    viewport.set_visible_window(TimeSpan::new(40.0, 60.0));

    handler.on_wheel(
        &WheelEvent::new(550.0, 50.0, 0.0, 10.0).with_modifiers(Modifiers::ctrl()),
        &mut viewport,
    );

    assert!(viewport.visible_window().duration() > 20.0);
}

#[test]
fn horizontal_wheel_pans_and_vertical_wheel_scrolls() {
    let (mut viewport, mut handler) = setup();
    viewport.set_visible_window(TimeSpan::new(20.0, 40.0));

    let panned = handler.on_wheel(&WheelEvent::new(500.0, 50.0, 90.0, 5.0), &mut viewport);
    assert_eq!(panned, WheelOutcome::Panned);
    assert_abs_diff_eq!(viewport.visible_window().start(), 22.0, epsilon = 1e-9);

    let scrolled = handler.on_wheel(&WheelEvent::new(500.0, 50.0, 0.0, 30.0), &mut viewport);
    assert_eq!(scrolled, WheelOutcome::ScrollTracks { delta_px: 30.0 });

    let ignored = handler.on_wheel(&WheelEvent::new(500.0, 50.0, 0.0, 0.0), &mut viewport);
    assert_eq!(ignored, WheelOutcome::Ignored);
}

#[test]
fn held_keys_navigate_each_tick() {
    let (mut viewport, mut handler) = setup();

    assert!(handler.on_key_down(Key::W));
    assert!(handler.tick(&mut viewport));
    assert!(handler.tick(&mut viewport));
    let zoomed = viewport.visible_window();
    assert!(zoomed.duration() < 100.0);

    handler.on_key_up(Key::W);
    assert!(handler.on_key_down(Key::D));
    assert!(handler.tick(&mut viewport));
    assert!(viewport.visible_window().start() > zoomed.start());

    handler.release_keys();
    assert!(!handler.tick(&mut viewport));
}

#[test]
fn hover_tracks_time_and_edge_cursor() {
    let (mut viewport, mut handler) = setup();
    viewport.set_selected_area(Some(Area::new(20.0, 40.0)));
    let mut actions = Vec::new();

    handler.on_mouse_move(&PointerEvent::released(550.0, 50.0), &mut viewport, &Bands, &mut actions);
    assert_abs_diff_eq!(viewport.hover_time().expect("hover time"), 50.0, epsilon = 1e-9);
    assert_eq!(handler.cursor(), CursorStyle::Default);

    handler.on_mouse_move(&PointerEvent::released(461.0, 50.0), &mut viewport, &Bands, &mut actions);
    assert_eq!(handler.cursor(), CursorStyle::EwResize);

    handler.on_mouse_move(&PointerEvent::released(50.0, 50.0), &mut viewport, &Bands, &mut actions);
    assert_eq!(viewport.hover_time(), None);

    handler.on_mouse_move(&PointerEvent::released(550.0, 50.0), &mut viewport, &Bands, &mut actions);
    handler.on_mouse_leave(&mut viewport);
    assert_eq!(viewport.hover_time(), None);
}

#[test]
fn overview_brush_drag_moves_visible_window() {
    let (mut viewport, mut handler) = setup();
    viewport.set_visible_window(TimeSpan::new(20.0, 40.0));
    let mut actions = Vec::new();

    handler.on_mouse_down(&PointerEvent::pressed(370.0, 20.0), PanelDragBehavior::OverviewBrush);
    handler.on_mouse_move(&PointerEvent::pressed(375.0, 20.0), &mut viewport, &Bands, &mut actions);
    assert_eq!(handler.drag_mode(), DragMode::OverviewBrush);
    handler.on_mouse_move(&PointerEvent::pressed(460.0, 20.0), &mut viewport, &Bands, &mut actions);
    handler.on_mouse_up(&PointerEvent::released(460.0, 20.0), &mut viewport, &Bands, &mut actions);

    let visible = viewport.visible_window();
    assert_abs_diff_eq!(visible.duration(), 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(visible.start(), 30.0, epsilon = 1e-9);
    assert!(actions.is_empty());
}
