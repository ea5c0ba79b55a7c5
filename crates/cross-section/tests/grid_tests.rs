//! Tests for scattered sample regularization.

use cross_section::{build_grid, Sample};
use test_utils::{create_test_grid, cross_section_triples, scrambled, Triple};

fn to_samples(triples: &[Triple]) -> Vec<Sample> {
    triples
        .iter()
        .map(|&(x, z, v)| Sample::new(v).with_coord("x", x).with_coord("z", z))
        .collect()
}

// ============================================================================
// Basic layout
// ============================================================================

#[test]
fn test_three_by_two_presorted() {
    let samples = to_samples(&[
        (0.0, 0.0, Some(1.0)),
        (1.0, 0.0, Some(2.0)),
        (2.0, 0.0, Some(3.0)),
        (0.0, 1.0, Some(10.0)),
        (1.0, 1.0, Some(20.0)),
        (2.0, 1.0, Some(30.0)),
    ]);

    let grid = build_grid(&samples, "x", "z");
    assert_eq!(grid.width, 3);
    assert_eq!(grid.height, 2);
    assert_eq!(grid.values, vec![1.0, 2.0, 3.0, 10.0, 20.0, 30.0]);
}

#[test]
fn test_three_by_two_scrambled() {
    let ordered = [
        (0.0, 0.0, Some(1.0)),
        (1.0, 0.0, Some(2.0)),
        (2.0, 0.0, Some(3.0)),
        (0.0, 1.0, Some(10.0)),
        (1.0, 1.0, Some(20.0)),
        (2.0, 1.0, Some(30.0)),
    ];

    for seed in 0..10 {
        let samples = to_samples(&scrambled(&ordered, seed));
        let grid = build_grid(&samples, "x", "z");
        assert_eq!(grid.values, vec![1.0, 2.0, 3.0, 10.0, 20.0, 30.0], "seed {seed}");
        assert_eq!((grid.width, grid.height), (3, 2));
    }
}

#[test]
fn test_order_is_independent_of_input_permutation() {
    let xs: Vec<f64> = (0..7).map(|i| i as f64 * 0.5).collect();
    let zs = [1000.0, 850.0, 700.0, 500.0, 300.0];
    let triples = cross_section_triples(&xs, &zs, |x, z| x * 3.0 - z / 100.0);

    let reference = build_grid(&to_samples(&triples), "x", "z");
    assert!(reference.is_rectangular());
    assert_eq!((reference.width, reference.height), (7, 5));

    for seed in [1, 7, 42, 1234] {
        let grid = build_grid(&to_samples(&scrambled(&triples, seed)), "x", "z");
        assert_eq!(grid, reference);
    }
}

#[test]
fn test_rows_are_ascending_levels() {
    // Levels given in descending (pressure) order still come out ascending.
    let triples = cross_section_triples(&[0.0, 1.0], &[850.0, 500.0], |x, z| x + z);
    let grid = build_grid(&to_samples(&triples), "x", "z");
    assert_eq!(grid.get(0, 0), Some(500.0));
    assert_eq!(grid.get(1, 0), Some(501.0));
    assert_eq!(grid.get(0, 1), Some(850.0));
    assert_eq!(grid.get(2, 0), None);
}

#[test]
fn test_predictable_grid_round_trip() {
    let (w, h) = (6, 4);
    let expected = create_test_grid(w, h);
    let mut samples = Vec::new();
    for row in 0..h {
        for col in 0..w {
            samples.push(
                Sample::new(Some(expected[row * w + col]))
                    .with_coord("x", col as f64)
                    .with_coord("z", row as f64),
            );
        }
    }
    let grid = build_grid(&scrambled(&samples, 5), "x", "z");
    assert_eq!(grid.values, expected);
}

// ============================================================================
// Missing values
// ============================================================================

#[test]
fn test_empty_input_yields_empty_grid() {
    let grid = build_grid(&[], "x", "z");
    assert!(grid.is_empty());
    assert_eq!((grid.width, grid.height), (0, 0));
}

#[test]
fn test_all_null_yields_empty_grid() {
    let samples = to_samples(&[(0.0, 0.0, None), (1.0, 0.0, None)]);
    let grid = build_grid(&samples, "x", "z");
    assert!(grid.is_empty());
    assert_eq!((grid.width, grid.height), (0, 0));
}

#[test]
fn test_null_values_are_dropped_before_counting() {
    // The only sample at x = 2 is null, so that column disappears.
    let samples = to_samples(&[
        (0.0, 0.0, Some(1.0)),
        (1.0, 0.0, Some(2.0)),
        (2.0, 0.0, None),
        (0.0, 1.0, Some(3.0)),
        (1.0, 1.0, Some(4.0)),
        (2.0, 1.0, None),
    ]);
    let grid = build_grid(&samples, "x", "z");
    assert_eq!((grid.width, grid.height), (2, 2));
    assert_eq!(grid.values, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_non_finite_values_are_missing() {
    let samples = to_samples(&[
        (0.0, 0.0, Some(f64::NAN)),
        (1.0, 0.0, Some(f64::INFINITY)),
        (2.0, 0.0, Some(5.0)),
    ]);
    let grid = build_grid(&samples, "x", "z");
    assert_eq!(grid.values, vec![5.0]);
    assert_eq!((grid.width, grid.height), (1, 1));
}

#[test]
fn test_partial_nulls_leave_ragged_grid() {
    let samples = to_samples(&[
        (0.0, 0.0, Some(1.0)),
        (1.0, 0.0, None),
        (0.0, 1.0, Some(3.0)),
        (1.0, 1.0, Some(4.0)),
    ]);
    let grid = build_grid(&samples, "x", "z");
    assert_eq!((grid.width, grid.height), (2, 2));
    assert_eq!(grid.values.len(), 3);
    assert!(!grid.is_rectangular());
}

// ============================================================================
// Irregular input
// ============================================================================

#[test]
fn test_duplicate_positions_are_kept() {
    let samples = to_samples(&[
        (0.0, 0.0, Some(1.0)),
        (0.0, 0.0, Some(2.0)),
        (1.0, 0.0, Some(3.0)),
    ]);
    let grid = build_grid(&samples, "x", "z");
    assert_eq!(grid.width, 2);
    assert_eq!(grid.height, 1);
    assert_eq!(grid.values.len(), 3);
    assert!(!grid.is_rectangular());
}

#[test]
fn test_signed_zero_levels_form_one_row() {
    let samples = to_samples(&[(1.0, -0.0, Some(1.0)), (0.0, 0.0, Some(0.0))]);
    let grid = build_grid(&samples, "x", "z");
    assert_eq!((grid.width, grid.height), (2, 1));
    assert_eq!(grid.values, vec![0.0, 1.0]);
}

#[test]
fn test_signed_zero_positions_are_one_column() {
    let samples = to_samples(&[
        (0.0, 1.0, Some(3.0)),
        (-0.0, 0.0, Some(1.0)),
        (1.0, 0.0, Some(2.0)),
        (1.0, 1.0, Some(4.0)),
    ]);
    let grid = build_grid(&samples, "x", "z");
    assert_eq!((grid.width, grid.height), (2, 2));
    assert!(grid.is_rectangular());
    assert_eq!(grid.values, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_text_coordinates_sort_lexically() {
    let samples = vec![
        Sample::new(Some(2.0))
            .with_coord("x", 0.0)
            .with_coord("t", "2024-12-29T12:00:00Z"),
        Sample::new(Some(1.0))
            .with_coord("x", 0.0)
            .with_coord("t", "2024-12-29T06:00:00Z"),
    ];
    let grid = build_grid(&samples, "x", "t");
    assert_eq!(grid.values, vec![1.0, 2.0]);
    assert_eq!((grid.width, grid.height), (1, 2));
}

#[test]
fn test_missing_axis_counts_as_one_position() {
    let samples = vec![
        Sample::new(Some(1.0)).with_coord("x", 0.0),
        Sample::new(Some(2.0)).with_coord("x", 1.0),
    ];
    let grid = build_grid(&samples, "x", "z");
    assert_eq!((grid.width, grid.height), (2, 1));
    assert!(grid.is_rectangular());
}

#[test]
fn test_value_range() {
    let triples = cross_section_triples(&[0.0, 1.0, 2.0], &[0.0, 1.0], |x, z| x - 10.0 * z);
    let grid = build_grid(&to_samples(&triples), "x", "z");
    assert_eq!(grid.value_range(), Some((-10.0, 2.0)));
    assert_eq!(build_grid(&[], "x", "z").value_range(), None);
}
