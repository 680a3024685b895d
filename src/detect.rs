//! Stop and left-turn detection over a reconstructed trajectory
//!
//! Both detectors are pure functions of a read-only track plus the config,
//! so they can run concurrently against the same trajectory. They share the
//! same building blocks: fixed-width centered window transforms (median,
//! sum, logical OR) whose windows truncate at the sequence ends, and a
//! partition of a boolean classification into maximal runs.

use crate::config::TrackConfig;
use crate::types::{StopEvent, Track, TurnEvent};

/// Centered median over a fixed window, one output per input index.
///
/// The median rejects single-sample spikes before any aggregation sees them.
/// Windows truncate at the sequence ends; even-sized windows average the two
/// middle values.
pub fn centered_median(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.len() <= 1 {
        return values.to_vec();
    }
    let mut out = Vec::with_capacity(values.len());
    let mut buffer: Vec<f64> = Vec::with_capacity(window);
    for i in 0..values.len() {
        let (start, end) = window_bounds(i, values.len(), window);
        buffer.clear();
        buffer.extend_from_slice(&values[start..=end]);
        buffer.sort_by(f64::total_cmp);
        let n = buffer.len();
        let median = if n % 2 == 1 {
            buffer[n / 2]
        } else {
            (buffer[n / 2 - 1] + buffer[n / 2]) / 2.0
        };
        out.push(median);
    }
    out
}

/// Centered rolling sum over a fixed window, truncating at the ends.
pub fn centered_sum(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.len() <= 1 {
        return values.to_vec();
    }
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let (start, end) = window_bounds(i, values.len(), window);
        out.push(values[start..=end].iter().sum());
    }
    out
}

/// Centered rolling logical OR over a fixed window, truncating at the ends.
///
/// Used to dilate candidate flags so small gaps inside one physical maneuver
/// merge into a single run.
pub fn centered_any(flags: &[bool], window: usize) -> Vec<bool> {
    if window <= 1 || flags.len() <= 1 {
        return flags.to_vec();
    }
    let mut out = Vec::with_capacity(flags.len());
    for i in 0..flags.len() {
        let (start, end) = window_bounds(i, flags.len(), window);
        out.push(flags[start..=end].iter().any(|&f| f));
    }
    out
}

fn window_bounds(index: usize, len: usize, window: usize) -> (usize, usize) {
    let half = window / 2;
    let start = index.saturating_sub(half);
    let end = (index + half).min(len - 1);
    (start, end)
}

/// Maximal runs of `true`, as inclusive (start, end) index pairs
fn flag_runs(flags: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, &flag) in flags.iter().enumerate() {
        match (flag, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                runs.push((start, i - 1));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        runs.push((start, flags.len() - 1));
    }
    runs
}

/// Detect sustained stationary intervals.
///
/// Points at or below `stop_speed_ms` are classified slow; maximal slow runs
/// whose duration falls inside the configured bounds (inclusive) become
/// events. The lower bound excludes brief signal noise, the upper bound
/// excludes park-and-leave intervals. Event location is the run's first
/// point.
pub fn detect_stops(track: &Track, config: &TrackConfig) -> Vec<StopEvent> {
    let slow: Vec<bool> = track
        .points
        .iter()
        .map(|p| p.speed_ms <= config.stop_speed_ms)
        .collect();

    let mut events = Vec::new();
    for (start, end) in flag_runs(&slow) {
        let first = &track.points[start];
        let last = &track.points[end];
        let duration = last.time.signed_duration_since(first.time).num_milliseconds() as f64
            / 1000.0;
        if duration >= config.stop_min_duration_s && duration <= config.stop_max_duration_s {
            events.push(StopEvent {
                start_time: first.time,
                end_time: last.time,
                latitude: first.latitude,
                longitude: first.longitude,
                point_count: end - start + 1,
            });
        }
    }
    events
}

/// Detect sustained left-turn maneuvers from the heading signal.
///
/// Per-point heading deltas (simple first difference, 0 for the first point)
/// are median-filtered and then summed over the same centered window: the
/// median stage rejects outlier spikes, the sum stage approximates net
/// curvature across the window. A point is a candidate when its windowed
/// curvature lies in the configured left-turn band and it is moving fast
/// enough for heading to mean anything. Candidates are dilated with a rolling
/// OR of the same width, partitioned into runs, and only runs of at least
/// `turn_min_points` points become events.
pub fn detect_left_turns(track: &Track, config: &TrackConfig) -> Vec<TurnEvent> {
    let n = track.len();
    if n == 0 {
        return Vec::new();
    }

    let mut deltas = vec![0.0; n];
    for i in 1..n {
        deltas[i] = track.points[i].track_deg - track.points[i - 1].track_deg;
    }

    let smoothed = centered_median(&deltas, config.turn_window);
    let curvature = centered_sum(&smoothed, config.turn_window);

    let candidates: Vec<bool> = (0..n)
        .map(|i| {
            curvature[i] < -config.turn_min_deg
                && curvature[i] >= -config.turn_max_deg
                && track.points[i].speed_ms > config.min_moving_speed_ms
        })
        .collect();
    let dilated = centered_any(&candidates, config.turn_window);

    let mut events = Vec::new();
    for (start, end) in flag_runs(&dilated) {
        let point_count = end - start + 1;
        if point_count < config.turn_min_points {
            continue;
        }
        let first = &track.points[start];
        let last = &track.points[end];
        events.push(TurnEvent {
            start_time: first.time,
            end_time: last.time,
            latitude: first.latitude,
            longitude: first.longitude,
            point_count,
        });
    }
    events
}
