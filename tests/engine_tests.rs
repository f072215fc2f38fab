use approx::assert_abs_diff_eq;
use serde_json::json;
use trace_timeline::api::{Action, ActionLog, RedrawLevel, TimelineConfig, TimelineEngine};
use trace_timeline::core::{TimeSpan, Viewport};
use trace_timeline::error::TimelineError;
use trace_timeline::interaction::{Key, Modifiers, PointerEvent, Propagation, WheelEvent};
use trace_timeline::overlay::{Area, Note};
use trace_timeline::panel::{
    EmptyTrackData, PanelRegion, SLICE_TRACK_KIND, TrackConfig, TrackGroup, TrackGroupId, TrackId,
};
use trace_timeline::render::{Color, NullRenderer};

fn engine() -> TimelineEngine<NullRenderer> {
    let config = TimelineConfig::new(Viewport::new(1000, 600), 0.0, 100.0).with_shell_width(100.0);
    TimelineEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn slice_config(id: u32) -> TrackConfig {
    TrackConfig::new(TrackId::new(id), SLICE_TRACK_KIND, format!("thread {id}"))
}

fn click(engine: &mut TimelineEngine<NullRenderer>, x: f64, y: f64) {
    engine.on_mouse_down(&PointerEvent::pressed(x, y));
    engine.on_mouse_up(&PointerEvent::released(x, y), &EmptyTrackData);
}

#[test]
fn first_frame_renders_then_engine_goes_idle() {
    let mut engine = engine();

    let stats = engine
        .pump_frame(&EmptyTrackData)
        .expect("pump")
        .expect("initial frame");
    assert_eq!(stats.level, RedrawLevel::Full);
    assert_eq!(stats.frame_index, 0);
    assert!(stats.command_count > 0);
    assert_eq!(engine.renderer().frames_rendered, 1);

    assert!(engine.pump_frame(&EmptyTrackData).expect("pump").is_none());
    assert_eq!(engine.renderer().frames_rendered, 1);
}

#[test]
fn pinned_panels_come_first() {
    let engine = engine();
    let layout = engine.container().layout();
    assert_eq!(layout.len(), 3);
    assert!(layout.iter().all(|row| row.region == PanelRegion::Pinned));
    assert_abs_diff_eq!(engine.container().pinned_height(), 82.0, epsilon = 1e-9);
}

#[test]
fn structural_changes_force_a_full_redraw() {
    let mut engine = engine();
    engine.pump_frame(&EmptyTrackData).expect("pump");

    engine
        .add_track(PanelRegion::Scrolling, slice_config(1))
        .expect("add track");
    let stats = engine
        .pump_frame(&EmptyTrackData)
        .expect("pump")
        .expect("frame after add");
    assert_eq!(stats.level, RedrawLevel::Full);
    assert_eq!(stats.rows_drawn, 4);
}

#[test]
fn tracks_get_the_configured_default_height() {
    let mut engine = engine();
    engine
        .add_track(PanelRegion::Scrolling, slice_config(1))
        .expect("add track");
    engine
        .add_track(
            PanelRegion::Scrolling,
            slice_config(2).with_settings(json!({ "height": 64.0 })),
        )
        .expect("add track");

    let heights: Vec<f64> = engine
        .container()
        .layout()
        .iter()
        .filter(|row| row.region == PanelRegion::Scrolling)
        .map(|row| row.height)
        .collect();
    assert_eq!(heights, vec![engine.config().default_track_height, 64.0]);
}

#[test]
fn unknown_track_kind_is_rejected() {
    let mut engine = engine();
    let err = engine
        .add_track(
            PanelRegion::Scrolling,
            TrackConfig::new(TrackId::new(1), "flamegraph", "flames"),
        )
        .expect_err("unknown kind");
    assert!(matches!(err, TimelineError::UnknownTrackKind(_)));
}

#[test]
fn visible_window_changes_redraw_lightly() {
    let mut engine = engine();
    engine.pump_frame(&EmptyTrackData).expect("pump");

    assert!(engine.set_visible_window(TimeSpan::new(10.0, 30.0)));
    assert!(!engine.set_visible_window(TimeSpan::new(10.0, 30.0)));
    let stats = engine
        .pump_frame(&EmptyTrackData)
        .expect("pump")
        .expect("frame");
    assert_eq!(stats.level, RedrawLevel::Light);
    assert_eq!(engine.viewport().visible_window(), TimeSpan::new(10.0, 30.0));
}

#[test]
fn area_note_survives_a_color_change() {
    let mut engine = engine();
    engine
        .apply_action(&Action::SelectArea {
            area: Area::new(10.0, 20.0),
        })
        .expect("select area");

    let id = engine
        .create_area_note_from_selection()
        .expect("area note from selection");
    let blue = Color::rgb(0.0, 0.0, 1.0);
    engine.change_note_color(id, blue);

    let note = engine.notes().get(id).expect("note stored");
    assert_eq!(note.color(), blue);
    let Note::Area(area_note) = note else {
        panic!("expected an area note");
    };
    assert_eq!(area_note.area.start_sec, 10.0);
    assert_eq!(area_note.area.end_sec, 20.0);

    let actions = engine.drain_actions();
    assert_eq!(actions.len(), 2);
    assert!(matches!(actions[0], Action::AddAreaNote { .. }));
    assert_eq!(actions[1], Action::ChangeNoteColor { id, color: blue });
    assert!(engine.drain_actions().is_empty());
}

#[test]
fn invalid_note_color_keeps_frames_rendering() {
    let mut engine = engine();
    engine.pump_frame(&EmptyTrackData).expect("initial frame");
    engine
        .apply_action(&Action::SelectArea {
            area: Area::new(10.0, 20.0),
        })
        .expect("select area");
    let id = engine
        .create_area_note_from_selection()
        .expect("area note from selection");
    let original = engine.notes().get(id).expect("note stored").color();

    engine.change_note_color(id, Color::rgb(1.5, 0.0, 0.0));
    assert!(
        !engine
            .apply_action(&Action::ChangeNoteColor {
                id,
                color: Color::rgb(0.0, f64::NAN, 0.0),
            })
            .expect("apply")
    );

    assert_eq!(engine.notes().get(id).expect("note stored").color(), original);
    engine
        .pump_frame(&EmptyTrackData)
        .expect("frame after rejected color")
        .expect("note redraw");
    engine.set_visible_window(TimeSpan::new(5.0, 50.0));
    engine
        .pump_frame(&EmptyTrackData)
        .expect("later frame")
        .expect("window redraw");
}

#[test]
fn replayed_note_actions_are_harmless() {
    let mut engine = engine();
    engine
        .apply_action(&Action::SelectArea {
            area: Area::new(10.0, 20.0),
        })
        .expect("select area");
    engine.create_area_note_from_selection();

    for action in engine.drain_actions() {
        assert!(!engine.apply_action(&action).expect("replay"));
    }
    assert_eq!(engine.notes().len(), 1);
}

#[test]
fn m_key_needs_a_selection() {
    let mut engine = engine();
    assert_eq!(engine.on_key_down(Key::M), Propagation::Stop);
    assert!(engine.notes().is_empty());
    assert!(engine.drain_actions().is_empty());

    engine
        .apply_action(&Action::SelectArea {
            area: Area::new(40.0, 60.0),
        })
        .expect("select area");
    engine.on_key_down(Key::M);
    assert_eq!(engine.notes().len(), 1);
    assert_eq!(engine.notes().selected_note().map(Note::start_time), Some(40.0));
}

#[test]
fn escape_clears_the_selection() {
    let mut engine = engine();
    engine
        .apply_action(&Action::SelectArea {
            area: Area::new(40.0, 60.0),
        })
        .expect("select area");

    engine.on_key_down(Key::Escape);
    assert!(engine.viewport().selected_area().is_none());
    assert_eq!(engine.drain_actions(), vec![Action::DeselectArea]);

    engine.on_key_down(Key::Escape);
    assert!(engine.drain_actions().is_empty());
}

#[test]
fn clicking_outside_the_selection_deselects() {
    let mut engine = engine();
    engine
        .apply_action(&Action::SelectArea {
            area: Area::new(10.0, 20.0),
        })
        .expect("select area");

    click(&mut engine, 235.0, 300.0);
    assert!(engine.viewport().selected_area().is_some());
    assert!(engine.drain_actions().is_empty());

    click(&mut engine, 700.0, 300.0);
    assert!(engine.viewport().selected_area().is_none());
    assert_eq!(engine.drain_actions(), vec![Action::DeselectArea]);
}

#[test]
fn clicking_the_notes_bar_adds_a_note() {
    let mut engine = engine();
    click(&mut engine, 550.0, 70.0);

    assert_eq!(engine.notes().len(), 1);
    let note = engine.notes().selected_note().expect("selected note");
    assert_abs_diff_eq!(note.start_time(), 50.0, epsilon = 1e-9);
    assert!(matches!(
        engine.drain_actions().as_slice(),
        [Action::AddNote { .. }]
    ));
}

#[test]
fn shift_drag_selects_an_area() {
    let mut engine = engine();
    engine.on_mouse_down(&PointerEvent::pressed(280.0, 300.0).with_modifiers(Modifiers::shift()));
    engine.on_mouse_move(&PointerEvent::pressed(370.0, 300.0), &EmptyTrackData);
    engine.on_mouse_move(&PointerEvent::pressed(460.0, 300.0), &EmptyTrackData);
    engine.on_mouse_up(&PointerEvent::released(460.0, 300.0), &EmptyTrackData);

    let area = engine.viewport().selected_area().expect("selection");
    assert_abs_diff_eq!(area.start_sec, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.end_sec, 40.0, epsilon = 1e-9);
    assert!(
        engine
            .drain_actions()
            .iter()
            .any(|action| matches!(action, Action::SelectArea { .. }))
    );
}

#[test]
fn group_collapse_waits_for_the_host() {
    let mut engine = engine();
    let group = TrackGroup::new(TrackGroupId::new(1), "renderer", TrackId::new(10))
        .with_members([TrackId::new(11), TrackId::new(12)]);
    engine
        .add_track_group(
            PanelRegion::Scrolling,
            group,
            vec![slice_config(10), slice_config(11), slice_config(12)],
        )
        .expect("add group");
    assert_eq!(engine.container().layout().len(), 4);

    click(&mut engine, 50.0, 100.0);
    let actions = engine.drain_actions();
    assert_eq!(
        actions,
        vec![Action::ToggleTrackGroupCollapsed {
            group: TrackGroupId::new(1)
        }]
    );
    assert_eq!(engine.container().layout().len(), 4);

    assert!(engine.apply_action(&actions[0]).expect("toggle"));
    assert_eq!(engine.container().layout().len(), 6);
}

#[test]
fn pinning_a_grouped_track_fails() {
    let mut engine = engine();
    let group = TrackGroup::new(TrackGroupId::new(1), "renderer", TrackId::new(10))
        .with_members([TrackId::new(11)]);
    engine
        .add_track_group(
            PanelRegion::Scrolling,
            group,
            vec![slice_config(10), slice_config(11)],
        )
        .expect("add group");

    let result = engine.apply_action(&Action::ToggleTrackPinned {
        track: TrackId::new(11),
    });
    assert!(result.is_err());
}

#[test]
fn plain_wheel_scrolls_tracks() {
    let mut engine = engine();
    for id in 0..20 {
        engine
            .add_track(PanelRegion::Scrolling, slice_config(id))
            .expect("add track");
    }
    engine.pump_frame(&EmptyTrackData).expect("pump");

    let propagation = engine.on_wheel(&WheelEvent::new(500.0, 300.0, 0.0, 100.0));
    assert_eq!(propagation, Propagation::Stop);
    assert_abs_diff_eq!(engine.container().scroll_offset(), 100.0, epsilon = 1e-9);

    let stats = engine
        .pump_frame(&EmptyTrackData)
        .expect("pump")
        .expect("frame");
    assert_eq!(stats.level, RedrawLevel::Light);
}

#[test]
fn ctrl_wheel_zooms_the_window() {
    let mut engine = engine();
    engine.on_wheel(&WheelEvent::new(550.0, 300.0, 0.0, -100.0).with_modifiers(Modifiers::ctrl()));
    assert!(engine.viewport().visible_window().duration() < 100.0);
}

#[test]
fn held_key_navigates_on_frame_pump() {
    let mut engine = engine();
    engine.set_visible_window(TimeSpan::new(40.0, 60.0));
    engine.pump_frame(&EmptyTrackData).expect("pump");

    assert_eq!(engine.on_key_down(Key::D), Propagation::Stop);
    engine.pump_frame(&EmptyTrackData).expect("pump");
    assert!(engine.viewport().visible_window().start() > 40.0);

    engine.on_key_up(Key::D);
    let before = engine.viewport().visible_window();
    engine.pump_frame(&EmptyTrackData).expect("pump");
    assert_eq!(engine.viewport().visible_window(), before);
}

#[test]
fn blur_releases_held_keys() {
    let mut engine = engine();
    engine.set_visible_window(TimeSpan::new(40.0, 60.0));
    engine.on_key_down(Key::A);
    engine.on_blur();
    engine.pump_frame(&EmptyTrackData).expect("pump");
    assert_eq!(engine.viewport().visible_window(), TimeSpan::new(40.0, 60.0));
}

#[test]
fn pending_actions_reach_the_dispatcher_in_order() {
    let mut engine = engine();
    click(&mut engine, 550.0, 70.0);
    let id = engine.notes().selected().expect("note");
    engine.change_note_text(id, "jank");
    engine.remove_note(id);

    let mut log = ActionLog::new();
    engine.dispatch_pending(&mut log);
    assert_eq!(log.len(), 3);
    assert!(matches!(log.actions()[0], Action::AddNote { .. }));
    assert!(matches!(log.actions()[1], Action::ChangeNoteText { .. }));
    assert_eq!(log.actions()[2], Action::RemoveNote { id });
    assert!(engine.notes().is_empty());
    log.to_json_pretty().expect("log json");
}

#[test]
fn resize_rebinds_the_scale() {
    let mut engine = engine();
    engine.pump_frame(&EmptyTrackData).expect("pump");
    engine.resize(Viewport::new(1900, 600)).expect("resize");

    assert_abs_diff_eq!(engine.viewport().time_scale().end_px(), 1900.0, epsilon = 1e-9);
    assert_eq!(engine.container().viewport(), Viewport::new(1900, 600));
    let stats = engine
        .pump_frame(&EmptyTrackData)
        .expect("pump")
        .expect("frame");
    assert_eq!(stats.level, RedrawLevel::Full);

    assert!(engine.resize(Viewport::new(80, 600)).is_err());
}

#[test]
fn data_changes_trigger_a_frame() {
    let mut engine = engine();
    engine.pump_frame(&EmptyTrackData).expect("pump");
    engine.notify_data_changed();
    let stats = engine
        .render_now(&EmptyTrackData)
        .expect("render now");
    assert_eq!(stats.level, RedrawLevel::Full);
    assert!(engine.pump_frame(&EmptyTrackData).expect("pump").is_none());
    assert_eq!(engine.last_frame(), Some(stats));
}
