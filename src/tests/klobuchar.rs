use crate::{
    klobuchar::{METERS_PER_TECU, SPEED_OF_LIGHT_M_S},
    prelude::*,
    tests::toolkit::{grid_approx_eq, navigation_content, typical_coefficients},
};

use std::str::FromStr;

fn model() -> KlobucharModel {
    let (alpha, beta) = typical_coefficients();
    let coefficients = NavigationCoefficients::from_str(&navigation_content(alpha, beta)).unwrap();
    KlobucharModel::new(coefficients)
}

#[test]
fn navigation_coefficients() {
    let (alpha, beta) = typical_coefficients();
    let coefficients = NavigationCoefficients::from_str(&navigation_content(alpha, beta)).unwrap();

    assert_eq!(coefficients.alpha, alpha);
    assert_eq!(coefficients.beta, beta);
}

#[test]
fn deterministic_delays() {
    let model = model();

    for time_of_week_s in [0.0, 43_200.0, 518_400.0, 604_799.0] {
        let first = model.delay_grid(time_of_week_s);
        let second = model.delay_grid(time_of_week_s);
        assert_eq!(first, second);
    }
}

#[test]
fn positive_delays() {
    let model = model();

    for time_of_week_s in (0..96).map(|i| 518_400.0 + 900.0 * i as f64) {
        let grid = model.delay_grid(time_of_week_s);

        assert_eq!(grid.shape(), (LATITUDE_ROWS, LONGITUDE_COLUMNS));
        assert!(grid.values().iter().all(|value| value.is_finite()));

        // at least the night time delay
        assert!(grid.min() >= 5.0E-9 * SPEED_OF_LIGHT_M_S, "t={}", time_of_week_s);
    }
}

#[test]
fn tecu_conversion() {
    let model = model();
    let delay = model.delay_grid(50_400.0);
    let tecu = model.tecu_grid(50_400.0);

    grid_approx_eq(&(&tecu * METERS_PER_TECU), &delay, 1.0E-9);
}

#[test]
fn daily_series() {
    let model = model();

    let date = CalendarDate::from_str("2024-01-06").unwrap();
    let offsets = GpsTimeOffsets::from_date(&date);

    assert_eq!(offsets.start_of_day(), 518_400);

    let series = model.daily_tecu_series(&offsets);
    assert_eq!(series.len(), 96);
    assert_eq!(series.sampling_period, Duration::from_seconds(900.0));
    assert_eq!(series.time_of_day_hhmm(95), "23:45");

    for (index, offset) in offsets.iter().enumerate() {
        assert_eq!(series[index], model.tecu_grid(offset as f64));
    }
}

#[test]
fn night_side_is_quiet() {
    // pure night time model: amplitude is null everywhere
    let model = KlobucharModel::new(NavigationCoefficients {
        alpha: [0.0; 4],
        beta: [72_000.0, 0.0, 0.0, 0.0],
    });

    let grid = model.delay_grid(0.0);

    // only the slant factor remains, which is constant at zenith
    let expected = model.parameters(0.0, 0.0, 0.0).delay_m();
    grid_approx_eq(&grid, &Grid::filled(expected), 1.0E-12);
}

#[test]
fn reference_delays() {
    let model = model();

    // typical coefficients, Saturday 14:00 GPST
    let delays = model.delay_grid(568_800.0);

    for (row, column, expected_m) in [
        (35, 36, 14.682261139824163),
        (0, 0, 4.543615169345413),
        (20, 50, 6.249766036309046),
    ] {
        let delay_m = delays.get(row, column).unwrap();
        assert!(
            (delay_m - expected_m).abs() < 1.0E-9,
            "cell ({}, {}): {} versus {}",
            row,
            column,
            delay_m,
            expected_m
        );
    }

    let tecu = model.tecu_grid(568_800.0);
    assert!((tecu.get(35, 36).unwrap() - 14.682261139824163 / 0.16).abs() < 1.0E-8);
}
