use serde_json::json;
use trace_timeline::api::Action;
use trace_timeline::core::{TimeScale, TimeSpan, Viewport, gridlines};
use trace_timeline::error::TimelineError;
use trace_timeline::overlay::NoteStore;
use trace_timeline::panel::{
    ContainerRenderStats, EmptyTrackData, PanelContainer, PanelRegion, PanelRenderContext, RowKind,
    SLICE_TRACK_KIND, SliceTrack, Track, TrackConfig, TrackGroup, TrackGroupId, TrackId,
    TrackLocator,
};
use trace_timeline::render::{PaintContext, RenderFrame};

const WIDTH: f64 = 1000.0;
const SHELL: f64 = 100.0;

fn slice_track(id: u32, height: f64) -> Box<dyn Track> {
    let config = TrackConfig::new(TrackId::new(id), SLICE_TRACK_KIND, format!("track {id}"))
        .with_settings(json!({ "height": height }));
    Box::new(SliceTrack::new(config))
}

fn container() -> PanelContainer {
    PanelContainer::new(Viewport::new(1000, 600), SHELL, 40.0)
}

fn with_view<T>(f: impl FnOnce(&PanelRenderContext<'_>) -> T) -> T {
    let trace = TimeSpan::new(0.0, 100.0);
    let scale = TimeScale::new(trace, SHELL, WIDTH);
    let ticks = gridlines(WIDTH, trace, &scale);
    let notes = NoteStore::new();
    let view = PanelRenderContext {
        time_scale: &scale,
        visible_window: trace,
        trace_span: trace,
        shell_width: SHELL,
        device_pixel_ratio: 1.0,
        grid_ticks: ticks.as_slice(),
        selected_area: None,
        hover_time: None,
        notes: &notes,
        selection_line_width: 2.0,
    };
    f(&view)
}

fn render(container: &PanelContainer) -> (ContainerRenderStats, RenderFrame) {
    let mut frame = RenderFrame::new(container.viewport());
    let stats = with_view(|view| {
        let mut ctx = PaintContext::new(&mut frame);
        container.render(&mut ctx, view, &EmptyTrackData)
    });
    (stats, frame)
}

fn group(id: u32, summary: u32, members: &[u32]) -> (TrackGroup, Vec<Box<dyn Track>>) {
    let group = TrackGroup::new(TrackGroupId::new(id), format!("process {id}"), TrackId::new(summary))
        .with_members(members.iter().copied().map(TrackId::new));
    let tracks = std::iter::once(summary)
        .chain(members.iter().copied())
        .map(|track| slice_track(track, 30.0))
        .collect();
    (group, tracks)
}

#[test]
fn only_rows_in_view_are_drawn() {
    let mut container = container();
    for id in 0..10_000 {
        container
            .add_track(PanelRegion::Scrolling, slice_track(id, 50.0))
            .expect("add track");
    }

    let (stats, frame) = render(&container);
    assert_eq!(stats.rows_drawn, 12);
    assert_eq!(stats.rows_skipped, 9_988);
    frame.validate().expect("valid frame");

    assert!(container.scroll_by(25.0));
    let (stats, _) = render(&container);
    assert_eq!(stats.rows_drawn, 13);
}

#[test]
fn scroll_offset_is_clamped() {
    let mut container = container();
    for id in 0..100 {
        container
            .add_track(PanelRegion::Scrolling, slice_track(id, 50.0))
            .expect("add track");
    }

    assert_eq!(container.total_scroll_height(), 5_000.0);
    assert_eq!(container.max_scroll_offset(), 4_400.0);
    assert_eq!(container.set_scroll_offset(1e9), 4_400.0);
    assert_eq!(container.set_scroll_offset(-10.0), 0.0);
    assert_eq!(container.set_scroll_offset(f64::NAN), 0.0);
    assert!(!container.scroll_by(-5.0));
}

#[test]
fn pinned_rows_stay_put_while_scrolling() {
    let mut container = container();
    container
        .add_track(PanelRegion::Pinned, slice_track(1, 50.0))
        .expect("pinned");
    for id in 10..30 {
        container
            .add_track(PanelRegion::Scrolling, slice_track(id, 50.0))
            .expect("scrolling");
    }
    container.set_scroll_offset(100.0);

    let top = container.hit_test(500.0, 20.0).expect("pinned row");
    assert_eq!(top.region, PanelRegion::Pinned);
    assert_eq!(top.top, 0.0);

    let below = container.hit_test(500.0, 60.0).expect("scrolling row");
    assert_eq!(
        below.kind,
        RowKind::Track {
            track: TrackId::new(12),
            group: None
        }
    );
    assert_eq!(container.hit_test(500.0, 700.0), None);
}

#[test]
fn collapsed_group_shows_only_its_header() {
    let mut container = container();
    let (group, tracks) = group(1, 100, &[101, 102]);
    container
        .add_group(PanelRegion::Scrolling, group, tracks)
        .expect("add group");

    let rows = container.layout();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].height, 40.0);

    let located = container.tracks_in_vertical_range(0.0, 10.0);
    let located: Vec<_> = located.into_iter().collect();
    assert_eq!(located, vec![TrackId::new(100), TrackId::new(101), TrackId::new(102)]);

    assert!(!container
        .toggle_group_collapsed(TrackGroupId::new(1))
        .expect("toggle"));
    let rows = container.layout();
    assert_eq!(rows.len(), 3);
    assert_eq!(container.total_scroll_height(), 100.0);

    let header_only: Vec<_> = container.tracks_in_vertical_range(0.0, 10.0).into_iter().collect();
    assert_eq!(header_only, vec![TrackId::new(100)]);
    let member: Vec<_> = container.tracks_in_vertical_range(45.0, 50.0).into_iter().collect();
    assert_eq!(member, vec![TrackId::new(101)]);
}

#[test]
fn expanded_group_header_leaves_summary_undrawn() {
    let mut container = container();
    let (group, tracks) = group(1, 100, &[101]);
    container
        .add_group(PanelRegion::Scrolling, group, tracks)
        .expect("add group");
    let header_track_rects = |frame: &RenderFrame| {
        frame
            .rects()
            .filter(|rect| rect.x >= SHELL && rect.y < 40.0)
            .count()
    };

    let (_, collapsed) = render(&container);
    assert!(header_track_rects(&collapsed) > 0);

    container
        .toggle_group_collapsed(TrackGroupId::new(1))
        .expect("toggle");
    let (stats, expanded) = render(&container);
    assert_eq!(stats.rows_drawn, 2);
    assert_eq!(header_track_rects(&expanded), 0);
    assert!(expanded.rects().any(|rect| rect.x >= SHELL && rect.y >= 40.0));
}

#[test]
fn group_membership_is_validated() {
    let mut container = container();

    let (group_def, mut tracks) = group(1, 100, &[101]);
    tracks.pop();
    let err = container
        .add_group(PanelRegion::Scrolling, group_def, tracks)
        .expect_err("missing member");
    assert!(matches!(err, TimelineError::UnknownTrack(_)));

    let (group_def, mut tracks) = group(1, 100, &[101]);
    tracks.push(slice_track(999, 30.0));
    let err = container
        .add_group(PanelRegion::Scrolling, group_def, tracks)
        .expect_err("foreign track");
    assert!(matches!(err, TimelineError::InvalidData(_)));
    assert_eq!(container.track_count(), 0);
}

#[test]
fn pinning_moves_top_level_tracks_only() {
    let mut container = container();
    container
        .add_track(PanelRegion::Scrolling, slice_track(1, 50.0))
        .expect("add");
    let (group_def, tracks) = group(2, 200, &[201]);
    container
        .add_group(PanelRegion::Scrolling, group_def, tracks)
        .expect("group");

    assert_eq!(
        container.toggle_pinned(TrackId::new(1)).expect("pin"),
        PanelRegion::Pinned
    );
    assert_eq!(container.track_region(TrackId::new(1)), Some(PanelRegion::Pinned));
    assert_eq!(container.pinned_height(), 50.0);

    let err = container
        .toggle_pinned(TrackId::new(201))
        .expect_err("grouped track");
    assert!(matches!(err, TimelineError::InvalidData(_)));
    let err = container
        .toggle_pinned(TrackId::new(7))
        .expect_err("unknown track");
    assert!(matches!(err, TimelineError::UnknownTrack(_)));
}

#[test]
fn structural_edits_bump_generation() {
    let mut container = container();
    let start = container.structure_generation();

    container
        .add_track(PanelRegion::Scrolling, slice_track(1, 50.0))
        .expect("add");
    container
        .add_track(PanelRegion::Scrolling, slice_track(2, 50.0))
        .expect("add");
    let err = container
        .add_track(PanelRegion::Scrolling, slice_track(2, 50.0))
        .expect_err("duplicate");
    assert!(matches!(err, TimelineError::DuplicateId(_)));

    container.move_track(TrackId::new(2), 0).expect("move");
    let order: Vec<_> = container
        .layout()
        .into_iter()
        .map(|row| row.kind)
        .collect();
    assert_eq!(
        order,
        vec![
            RowKind::Track {
                track: TrackId::new(2),
                group: None
            },
            RowKind::Track {
                track: TrackId::new(1),
                group: None
            },
        ]
    );

    container.remove_track(TrackId::new(1)).expect("remove");
    assert_eq!(container.structure_generation(), start + 4);
    assert!(container.move_track(TrackId::new(1), 0).is_err());
}

#[test]
fn summary_track_goes_away_with_its_group() {
    let mut container = container();
    let (group_def, tracks) = group(1, 100, &[101, 102]);
    container
        .add_group(PanelRegion::Scrolling, group_def, tracks)
        .expect("group");

    let err = container
        .remove_track(TrackId::new(100))
        .expect_err("summary");
    assert!(matches!(err, TimelineError::InvalidData(_)));

    container.remove_track(TrackId::new(101)).expect("member");
    assert_eq!(container.group(TrackGroupId::new(1)).map(|g| g.members.len()), Some(1));

    container.remove_group(TrackGroupId::new(1)).expect("group");
    assert_eq!(container.track_count(), 0);
    assert_eq!(container.group_count(), 0);
}

#[test]
fn shell_clicks_emit_actions() {
    let mut container = container();
    container
        .add_track(PanelRegion::Scrolling, slice_track(1, 50.0))
        .expect("add");
    let (group_def, tracks) = group(2, 200, &[201]);
    container
        .add_group(PanelRegion::Scrolling, group_def, tracks)
        .expect("group");

    let mut actions = Vec::new();
    with_view(|view| {
        assert!(container.on_mouse_click(90.0, 20.0, view, &EmptyTrackData, &mut actions));
        assert!(!container.on_mouse_click(30.0, 20.0, view, &EmptyTrackData, &mut actions));
        assert!(container.on_mouse_click(30.0, 60.0, view, &EmptyTrackData, &mut actions));
        assert!(!container.on_mouse_click(500.0, 20.0, view, &EmptyTrackData, &mut actions));
    });

    assert_eq!(
        actions,
        vec![
            Action::ToggleTrackPinned {
                track: TrackId::new(1)
            },
            Action::ToggleTrackGroupCollapsed {
                group: TrackGroupId::new(2)
            },
        ]
    );
}

#[test]
fn rendered_rows_carry_shell_labels_and_gridlines() {
    let mut container = container();
    container
        .add_track(PanelRegion::Scrolling, slice_track(1, 50.0))
        .expect("add");
    let (group_def, tracks) = group(2, 200, &[201]);
    container
        .add_group(PanelRegion::Scrolling, group_def, tracks)
        .expect("group");

    let (stats, frame) = render(&container);

    assert_eq!(stats.rows_drawn, 2);
    let labels: Vec<_> = frame.texts().map(|text| text.text.as_str()).collect();
    assert!(labels.contains(&"track 1"));
    assert!(labels.contains(&"\u{25B8} process 2"));
    let gridlines = frame
        .lines()
        .filter(|line| line.x1 == line.x2 && line.x1 > SHELL)
        .count();
    assert!(gridlines >= 20, "expected gridlines in both rows, got {gridlines}");
}
