use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use trace_timeline::api::{TimelineConfig, TimelineEngine};
use trace_timeline::core::{TimeScale, TimeSpan, Viewport, gridlines};
use trace_timeline::panel::{
    EmptyTrackData, InMemoryTrackData, PanelRegion, SLICE_TRACK_KIND, SliceSample, TrackConfig,
    TrackData, TrackId, TrackPayload,
};
use trace_timeline::render::NullRenderer;

fn bench_time_scale_round_trip(c: &mut Criterion) {
    let scale = TimeScale::new(TimeSpan::new(0.0, 10_000.0), 250.0, 1920.0);

    c.bench_function("time_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.time_to_px(black_box(4_321.123));
            let _ = scale.px_to_time(px);
        })
    });
}

fn bench_gridlines_1080p(c: &mut Criterion) {
    let window = TimeSpan::new(12.345, 678.9);
    let scale = TimeScale::new(window, 250.0, 1920.0);

    c.bench_function("gridlines_1080p", |b| {
        b.iter(|| {
            let _ = gridlines(black_box(1920.0), black_box(window), black_box(&scale));
        })
    });
}

fn bench_frame_10k_tracks(c: &mut Criterion) {
    let config = TimelineConfig::new(Viewport::new(1920, 1080), 0.0, 10_000.0);
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    for id in 0..10_000 {
        engine
            .add_track(
                PanelRegion::Scrolling,
                TrackConfig::new(TrackId::new(id), SLICE_TRACK_KIND, format!("thread {id}"))
                    .with_settings(json!({ "height": 30.0 })),
            )
            .expect("add track");
    }

    c.bench_function("frame_10k_tracks_empty_data", |b| {
        b.iter(|| {
            let _ = engine
                .render_now(black_box(&EmptyTrackData))
                .expect("frame should render");
        })
    });
}

fn bench_frame_dense_slices(c: &mut Criterion) {
    let config = TimelineConfig::new(Viewport::new(1920, 1080), 0.0, 10_000.0);
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    let mut data = InMemoryTrackData::new();
    for id in 0..30 {
        let track = TrackId::new(id);
        engine
            .add_track(
                PanelRegion::Scrolling,
                TrackConfig::new(track, SLICE_TRACK_KIND, format!("thread {id}")),
            )
            .expect("add track");
        let slices = (0..5_000_u32)
            .map(|i| SliceSample {
                start: f64::from(i) * 2.0,
                duration: 1.5,
                depth: 0,
                title: format!("slice {i}"),
                color: None,
            })
            .collect();
        data.publish(
            track,
            TrackData {
                window: TimeSpan::new(0.0, 10_000.0),
                resolution: 0.0,
                payload: TrackPayload::Slices(slices),
            },
        );
    }

    c.bench_function("frame_30_tracks_5k_slices", |b| {
        b.iter(|| {
            let _ = engine
                .render_now(black_box(&data))
                .expect("frame should render");
        })
    });
}

criterion_group!(
    benches,
    bench_time_scale_round_trip,
    bench_gridlines_1080p,
    bench_frame_10k_tracks,
    bench_frame_dense_slices
);
criterion_main!(benches);
