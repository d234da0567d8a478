//! Behavior-driven tests for the batch splitter.
//!
//! These tests verify HOW long series split into bounded chunks and how the
//! window sequencer is driven over each chunk: contiguity, the per-batch
//! offset reset, and the opt-in carry mode.

use candleshot_core::{
    batched_windows, batches, Bar, BarSeries, BatchWindow, SnapshotPlan, ValidationError, Window,
};
use candleshot_tests::hourly_series;

// =============================================================================
// Batch Splitter: Chunking
// =============================================================================

#[test]
fn when_a_series_is_batched_concatenation_reproduces_it_exactly() {
    // Given: 2_500 bars split into chunks of 1_000
    let series = hourly_series(0, 2_500);

    // When: All chunks are collected
    let chunks: Vec<BarSeries> = batches(&series, 1_000).expect("valid batch size").collect();

    // Then: Chunk sizes are bounded and the last one is short
    assert_eq!(
        chunks.iter().map(BarSeries::len).collect::<Vec<_>>(),
        vec![1_000, 1_000, 500]
    );

    // And: No bar is duplicated or omitted
    let rejoined: Vec<Bar> = chunks.into_iter().flat_map(|chunk| chunk.bars).collect();
    assert_eq!(rejoined, series.bars);
}

#[test]
fn when_the_series_fits_one_batch_a_single_chunk_is_yielded() {
    let series = hourly_series(0, 300);
    let chunks: Vec<BarSeries> = batches(&series, 10_000).expect("valid batch size").collect();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], series);
}

#[test]
fn when_batch_size_is_zero_batching_fails() {
    let series = hourly_series(0, 10);
    let err = batches(&series, 0).expect_err("zero batch size must fail");
    assert!(matches!(
        err,
        ValidationError::InvalidParameter { field: "batch_size" }
    ));
}

// =============================================================================
// Batch Splitter: Driving the Sequencer
// =============================================================================

#[test]
fn when_a_plan_drives_batches_each_batch_restarts_at_offset_zero() {
    // Given: 250 bars, batches of 130, default-style view sizes
    let series = hourly_series(0, 250);
    let plan = SnapshotPlan {
        show_size: 120,
        step_size: 20,
        batch_size: 130,
        carry_offset_across_batches: false,
    };

    // When: Batched windows are generated
    let got: Vec<BatchWindow> = batched_windows(&series, &plan).expect("valid plan").collect();

    // Then: The second batch starts over with its own initial full view
    assert_eq!(
        got,
        vec![
            BatchWindow { batch: 0, window: Window::new(0, 120) },
            BatchWindow { batch: 0, window: Window::new(20, 130) },
            BatchWindow { batch: 1, window: Window::new(0, 120) },
        ]
    );
}

#[test]
fn when_carry_mode_is_enabled_the_next_batch_continues_the_stepping_phase() {
    // Given: 280 bars in two 140-bar batches, with carry enabled
    let series = hourly_series(0, 280);
    let plan = SnapshotPlan {
        show_size: 40,
        step_size: 30,
        batch_size: 140,
        carry_offset_across_batches: true,
    };

    // When: Batched windows are generated
    let got: Vec<BatchWindow> = batched_windows(&series, &plan).expect("valid plan").collect();

    // Then: Batch 0 ends with snapshot_start 120; the leftover step phase
    // (120 + 30 - 140 = 10) seeds batch 1 instead of resetting to zero
    let batch0: Vec<Window> = got.iter().filter(|w| w.batch == 0).map(|w| w.window).collect();
    let batch1: Vec<Window> = got.iter().filter(|w| w.batch == 1).map(|w| w.window).collect();

    assert_eq!(
        batch0,
        vec![
            Window::new(0, 40),
            Window::new(30, 70),
            Window::new(60, 100),
            Window::new(90, 130),
            Window::new(120, 140),
        ]
    );
    assert_eq!(
        batch1,
        vec![
            Window::new(10, 50),
            Window::new(40, 80),
            Window::new(70, 110),
            Window::new(100, 140),
        ]
    );
}

#[test]
fn when_carry_mode_is_disabled_batch_sequences_are_independent() {
    // Given: The same series and sizes as the carry scenario, carry off
    let series = hourly_series(0, 280);
    let plan = SnapshotPlan {
        show_size: 40,
        step_size: 30,
        batch_size: 140,
        carry_offset_across_batches: false,
    };

    // When: Batched windows are generated
    let got: Vec<BatchWindow> = batched_windows(&series, &plan).expect("valid plan").collect();

    // Then: Both batches yield the same sequence, offsets reset to zero
    let batch0: Vec<Window> = got.iter().filter(|w| w.batch == 0).map(|w| w.window).collect();
    let batch1: Vec<Window> = got.iter().filter(|w| w.batch == 1).map(|w| w.window).collect();
    assert_eq!(batch0, batch1);
    assert_eq!(batch0.first(), Some(&Window::new(0, 40)));
}

#[test]
fn when_windows_pair_with_chunks_every_slice_is_renderable() {
    // Given: Batched windows and the matching chunks
    let series = hourly_series(0, 450);
    let plan = SnapshotPlan {
        show_size: 50,
        step_size: 10,
        batch_size: 200,
        carry_offset_across_batches: false,
    };
    let chunks: Vec<BarSeries> = batches(&series, plan.batch_size).expect("valid").collect();

    // When: Each window is applied to its chunk
    for BatchWindow { batch, window } in batched_windows(&series, &plan).expect("valid plan") {
        // Then: Window indices always fall within the chunk they reference
        let chunk = &chunks[batch];
        assert!(window.end <= chunk.len(), "window must stay inside its batch");
        assert!(!chunk.slice(window.start, window.end).is_empty());
    }
}

#[test]
fn when_the_series_is_empty_no_batched_windows_fire() {
    let series = hourly_series(0, 0);
    let got: Vec<BatchWindow> =
        batched_windows(&series, &SnapshotPlan::default()).expect("valid plan").collect();
    assert!(got.is_empty());
}

#[test]
fn when_the_plan_has_a_zero_field_it_is_rejected() {
    let series = hourly_series(0, 10);
    let plan = SnapshotPlan {
        step_size: 0,
        ..SnapshotPlan::default()
    };
    let err = batched_windows(&series, &plan).expect_err("zero step_size must fail");
    assert!(matches!(
        err,
        ValidationError::InvalidParameter { field: "step_size" }
    ));
}
