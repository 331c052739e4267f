use crate::{
    prelude::*,
    tests::toolkit::{grid_approx_eq, series_constant_eq, SyntheticMaps},
};

use std::str::FromStr;

#[test]
fn first_two_hours() {
    // 0 TECu at midnight, 10 TECu at 2am
    let content =
        SyntheticMaps::new(13, |map, _, _| if map == 0 { 0 } else { 100 }).generate();

    let maps = TecMaps::from_str(&content).unwrap();

    let dense = maps.interpolated(8).unwrap();

    assert_eq!(dense.len(), 97);
    assert_eq!(dense.sampling_period, Duration::from_seconds(900.0));

    series_constant_eq(
        &dense.truncated(9),
        &[0.0, 1.25, 2.5, 3.75, 5.0, 6.25, 7.5, 8.75, 10.0],
        1.0E-12,
    );

    assert_eq!(dense.time_of_day_hhmm(8), "02:00");
    assert_eq!(dense.time_of_day_hhmm(96), "24:00");
}

#[test]
fn endpoints_are_preserved() {
    let content = SyntheticMaps::new(13, |map, row, column| {
        (map * 37 + row * 3 + column) as i64 % 997
    })
    .generate();

    let maps = TecMaps::from_str(&content).unwrap();
    let tecu = maps.tecu();

    let dense = maps.interpolated(8).unwrap();

    for map in 0..13 {
        assert_eq!(dense[map * 8], tecu[map], "map #{} was altered", map);
    }
}

#[test]
fn midpoint_is_mean() {
    let content = SyntheticMaps::new(2, |map, row, column| {
        if map == 0 {
            (row * 7 + column) as i64
        } else {
            (row * 3 + 2 * column) as i64
        }
    })
    .generate();

    let maps = TecMaps::from_str(&content).unwrap();
    let tecu = maps.tecu();

    let dense = maps.interpolated(2).unwrap();
    assert_eq!(dense.len(), 3);

    let mean = tecu[0].zip_with(&tecu[1], |lhs, rhs| (lhs + rhs) / 2.0);
    grid_approx_eq(&dense[1], &mean, 1.0E-9);
}

#[test]
fn invalid_interpolations() {
    let content = SyntheticMaps::new(1, |_, _, _| 10).generate();
    let maps = TecMaps::from_str(&content).unwrap();

    assert!(maps.interpolated(8).unwrap().is_empty());

    assert!(matches!(
        maps.interpolated(0),
        Err(Error::InvalidSubdivisions)
    ));
}
