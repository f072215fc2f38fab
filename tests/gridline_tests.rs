use trace_timeline::core::{
    DESIRED_PX_PER_STEP, TimeScale, TimeSpan, grid_step_size, gridlines, gridlines_with_spacing,
    time_to_string,
};

#[test]
fn step_size_picks_nice_values() {
    assert_eq!(grid_step_size(10.0, 10.0), 1.0);
    assert_eq!(grid_step_size(25.0, 10.0), 2.0);
    assert_eq!(grid_step_size(45.0, 10.0), 5.0);
    assert_eq!(grid_step_size(1_000.0, 10.0), 100.0);
}

#[test]
fn step_size_falls_back_for_degenerate_input() {
    assert_eq!(grid_step_size(0.0, 10.0), 1.0);
    assert_eq!(grid_step_size(-5.0, 10.0), 1.0);
    assert_eq!(grid_step_size(10.0, 0.0), 1.0);
    assert_eq!(grid_step_size(f64::NAN, 10.0), 1.0);
}

#[test]
fn ticks_cover_the_time_area() {
    let span = TimeSpan::new(0.0, 100.0);
    let scale = TimeScale::new(span, 100.0, 1000.0);

    let ticks = gridlines(1000.0, span, &scale);

    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[0].x, 100.0);
    assert_eq!(ticks[0].time, 0.0);
    assert_eq!(ticks[10].time, 100.0);
    assert!(ticks[10].x >= 999.0);
    assert!(ticks.iter().all(|tick| tick.x >= 100.0 && tick.x <= 1000.0));
    assert!(ticks.windows(2).all(|pair| pair[0].x < pair[1].x));
}

#[test]
fn ticks_snap_to_whole_pixels() {
    let span = TimeSpan::new(0.37, 13.91);
    let scale = TimeScale::new(span, 250.0, 1337.0);

    let ticks = gridlines(1337.0, span, &scale);

    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|tick| tick.x.fract() == 0.0));
}

#[test]
fn ticks_left_of_the_shell_are_dropped() {
    let span = TimeSpan::new(3.3, 9.7);
    let scale = TimeScale::new(span, 200.0, 800.0);

    let ticks = gridlines(800.0, span, &scale);

    assert!(ticks.iter().all(|tick| tick.x >= 200.0));
    assert!(ticks.iter().all(|tick| tick.time >= 3.0));
}

#[test]
fn tiny_steps_far_from_zero_still_advance() {
    let span = TimeSpan::new(1_000_000.0, 1_000_000.000_01);
    let scale = TimeScale::new(span, 0.0, 1000.0);

    let ticks = gridlines(1000.0, span, &scale);

    assert!(ticks.len() >= 2);
    assert!(ticks.windows(2).all(|pair| pair[0].time < pair[1].time));
}

#[test]
fn wider_spacing_yields_fewer_ticks() {
    let span = TimeSpan::new(0.0, 100.0);
    let scale = TimeScale::new(span, 0.0, 1000.0);

    let dense = gridlines_with_spacing(1000.0, span, &scale, DESIRED_PX_PER_STEP / 2.0);
    let sparse = gridlines_with_spacing(1000.0, span, &scale, DESIRED_PX_PER_STEP * 2.0);

    assert!(dense.len() > sparse.len());
}

#[test]
fn empty_span_or_width_yields_no_ticks() {
    let span = TimeSpan::new(5.0, 5.0);
    let scale = TimeScale::new(span, 0.0, 1000.0);
    assert!(gridlines(1000.0, span, &scale).is_empty());

    let span = TimeSpan::new(0.0, 5.0);
    assert!(gridlines(0.0, span, &scale).is_empty());
    assert!(gridlines_with_spacing(1000.0, span, &scale, 0.0).is_empty());
}

#[test]
fn time_labels_use_largest_fitting_unit() {
    assert_eq!(time_to_string(12.0), "12 s");
    assert_eq!(time_to_string(0.5), "500 ms");
    assert_eq!(time_to_string(0.000_02), "20 us");
    assert_eq!(time_to_string(0.000_000_004), "4 ns");
    assert_eq!(time_to_string(1.25), "1.3 s");
}
