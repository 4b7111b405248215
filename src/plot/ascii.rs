//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - samples: `o`
//! - cubic spline: `-` line

use crate::domain::{Series, SplineSegment};

/// Render one core's samples with its spline drawn across the full time range.
pub fn render_core_plot(
    series: &Series,
    spline: &[SplineSegment],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((t_min, t_max)) = series.time_range().filter(|(lo, hi)| hi > lo) else {
        return "Plot: not enough samples\n".to_string();
    };
    let (t_min, t_max) = (t_min as f64, t_max as f64);

    let curve = sample_spline(spline, t_min, t_max, width);
    let Some((y_min, y_max)) = y_range(series, &curve) else {
        return "Plot: no finite readings\n".to_string();
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_curve(&mut grid, &curve, t_min, t_max, y_min, y_max);

    for (t, y) in series.points() {
        let x = map_x(t, t_min, t_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: t=[{t_min:.0}, {t_max:.0}]s | y=[{y_min:.2}, {y_max:.2}]°C\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Evaluate the spline at `n` evenly spaced times.
fn sample_spline(spline: &[SplineSegment], t_min: f64, t_max: f64, n: usize) -> Vec<(f64, f64)> {
    if spline.is_empty() {
        return Vec::new();
    }
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    let mut seg_idx = 0;
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let t = t_min + u * (t_max - t_min);
        while seg_idx + 1 < spline.len() && t > spline[seg_idx].x_end as f64 {
            seg_idx += 1;
        }
        out.push((t, spline[seg_idx].eval(t)));
    }
    out
}

/// Value range of samples and curve. A flat core gets a 1°C window centred
/// on its reading.
fn y_range(series: &Series, curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &y in series.values().iter().chain(curve.iter().map(|(_, y)| y)) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        Some((min_y - 0.5, max_y + 0.5))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, row, '-');
        } else {
            grid[row][x] = '-';
        }
        prev = Some((x, row));
    }
}

/// Integer line drawing (Bresenham).
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::natural_cubic_spline;

    #[test]
    fn plot_golden_snapshot_two_points() {
        let series = Series::new(vec![0, 10], vec![50.0, 60.0]).unwrap();
        let spline = natural_cubic_spline(&series).unwrap();

        let txt = render_core_plot(&series, &spline, 10, 5);
        let expected = concat!(
            "Plot: t=[0, 10]s | y=[49.50, 60.50]°C\n",
            "         o\n",
            "      --- \n",
            "    --    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_core_is_centred_on_its_reading() {
        let series = Series::new(vec![0, 30, 60], vec![50.0, 50.0, 50.0]).unwrap();
        let spline = natural_cubic_spline(&series).unwrap();

        let txt = render_core_plot(&series, &spline, 10, 5);
        let expected = concat!(
            "Plot: t=[0, 60]s | y=[49.45, 50.55]°C\n",
            "          \n",
            "          \n",
            "o----o---o\n",
            "          \n",
            "          \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn spline_sampling_walks_segments_in_order() {
        let series = Series::new(vec![0, 30, 60, 90], vec![61.0, 63.0, 50.0, 58.0]).unwrap();
        let spline = natural_cubic_spline(&series).unwrap();
        let curve = sample_spline(&spline, 0.0, 90.0, 4);
        let ys: Vec<f64> = curve.iter().map(|&(_, y)| y).collect();
        for (got, want) in ys.iter().zip(series.values()) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn single_sample_has_nothing_to_plot() {
        let series = Series::new(vec![0], vec![50.0]).unwrap();
        assert_eq!(render_core_plot(&series, &[], 20, 6), "Plot: not enough samples\n");
    }
}
