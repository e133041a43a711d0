//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks of a curve's shape
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - reward curve: `-` line (rank on x, best rank on the left)
//! - optional markers: `o` (e.g. chapter boundaries)

use crate::domain::RewardCurveConfig;
use crate::engine::evaluate;

/// Render the reward curve of one config across its rank domain.
pub fn render_curve_plot(
    config: &RewardCurveConfig,
    label: &str,
    width: usize,
    height: usize,
    markers: &[i64],
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let curve = sample_curve(config, width);
    let marker_points: Vec<(f64, f64)> = markers
        .iter()
        .filter(|r| config.rank_range().contains(r))
        .map(|&r| (r as f64, evaluate(r, config)))
        .collect();

    render_plot(
        &curve,
        &marker_points,
        config.rank_min as f64,
        config.rank_max as f64,
        label,
        width,
        height,
    )
}

fn render_plot(
    curve: &[(f64, f64)],
    markers: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    label: &str,
    width: usize,
    height: usize,
) -> String {
    let (y_min, y_max) = y_range(curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so markers can overlay).
    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);

    for &(x, y) in markers {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: rank=[{x_min:.0}, {x_max:.0}] | {label}=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Evaluate `n` ranks spread evenly across the domain.
fn sample_curve(config: &RewardCurveConfig, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let span = config.rank_max as f64 - config.rank_min as f64;
    let mut out = Vec::with_capacity(n);
    let mut last_rank = None;
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let rank = config.clamp_rank((config.rank_min as f64 + u * span).round() as i64);
        if last_rank == Some(rank) {
            continue;
        }
        last_rank = Some(rank);
        out.push((rank as f64, evaluate(rank, config)));
    }
    out
}

fn y_range(curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in curve {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && min_y == max_y {
        // Flat curve: center it.
        Some((min_y - 0.5, max_y + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
