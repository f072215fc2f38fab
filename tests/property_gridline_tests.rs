use proptest::prelude::*;
use trace_timeline::core::{TimeScale, TimeSpan, grid_step_size, gridlines};

proptest! {
    #[test]
    fn step_is_one_two_or_five_times_a_power_of_ten(
        range in 1e-9f64..1e9,
        desired_steps in 1.0f64..100.0
    ) {
        let step = grid_step_size(range, desired_steps);
        let exponent = step.log10().floor();
        let mantissa = step / 10f64.powf(exponent);
        let nice = [1.0, 2.0, 5.0, 10.0]
            .iter()
            .any(|candidate| (mantissa - candidate).abs() < 1e-6);

        prop_assert!(nice, "step {step} has mantissa {mantissa}");
    }

    #[test]
    fn ticks_are_inside_time_area_and_ordered(
        start in -1_000.0f64..1_000.0,
        duration in 0.001f64..1_000.0,
        shell in 0.0f64..300.0,
        width in 400.0f64..3000.0
    ) {
        let span = TimeSpan::new(start, start + duration);
        let scale = TimeScale::new(span, shell, width);

        let ticks = gridlines(width, span, &scale);

        for tick in &ticks {
            prop_assert!(tick.x >= shell && tick.x <= width);
        }
        for pair in ticks.windows(2) {
            prop_assert!(pair[0].time < pair[1].time);
        }
    }
}
