use proptest::prelude::*;
use trace_timeline::core::{MIN_ZOOM_SPAN, TimeScale, TimeSpan, compute_pan, compute_zoom, fit_within};

proptest! {
    #[test]
    fn pan_stays_inside_trace(
        visible_start in 0.0f64..900.0,
        visible_len in 0.01f64..100.0,
        delta in -5_000.0f64..5_000.0
    ) {
        let trace = TimeSpan::new(0.0, 1_000.0);
        let visible = TimeSpan::new(visible_start, visible_start + visible_len);

        let panned = compute_pan(visible, trace, delta);

        prop_assert!(panned.start() >= trace.start() - 1e-9);
        prop_assert!(panned.end() <= trace.end() + 1e-9);
        prop_assert!((panned.duration() - visible.duration()).abs() <= 1e-9);
    }

    #[test]
    fn zoom_then_fit_stays_inside_trace(
        visible_start in 0.0f64..900.0,
        visible_len in 0.01f64..100.0,
        factor in 0.01f64..50.0,
        anchor in 0.0f64..1_200.0
    ) {
        let trace = TimeSpan::new(0.0, 1_000.0);
        let visible = TimeSpan::new(visible_start, visible_start + visible_len);
        let scale = TimeScale::new(visible, 200.0, 1_200.0);

        let zoomed = compute_zoom(&scale, visible, factor, anchor);
        prop_assert!(zoomed.duration() >= MIN_ZOOM_SPAN - 1e-15);

        let fitted = fit_within(zoomed, trace);
        prop_assert!(fitted.start() >= trace.start() - 1e-9);
        prop_assert!(fitted.end() <= trace.end() + 1e-9);
    }

    #[test]
    fn huge_zoom_factor_never_panics(
        exponent in 0i32..=308,
        anchor in -100.0f64..1_300.0
    ) {
        let trace = TimeSpan::new(0.0, 1_000.0);
        let visible = TimeSpan::new(250.0, 750.0);
        let scale = TimeScale::new(visible, 200.0, 1_200.0);

        let zoomed = compute_zoom(&scale, visible, 10f64.powi(exponent), anchor);
        prop_assert!(zoomed.start().is_finite());
        prop_assert!(zoomed.end().is_finite());

        let fitted = fit_within(zoomed, trace);
        prop_assert!(fitted.start() >= trace.start() - 1e-9);
        prop_assert!(fitted.end() <= trace.end() + 1e-9);
    }
}
