use std::io::{self, Write};

use crate::aggregate::Bucket;

/// Length of the longest histogram bar, in characters.
pub const BAR_WIDTH: u64 = 30;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Renders each bucket as a proportional text histogram: a key header, a
/// column-label line, then one line per point with the y value formatted as
/// whole seconds dot nanoseconds and a bar scaled against the bucket's own
/// maximum y (not a global maximum).
pub fn render<W: Write>(
    out: &mut W,
    buckets: &[Bucket],
    key_label: &str,
    x_label: &str,
    y_label: &str,
) -> io::Result<()> {
    for bucket in buckets {
        writeln!(out, "{} = {}", key_label, bucket.key)?;
        writeln!(out, "{}, {}", x_label, y_label)?;

        let max_y = bucket.points.iter().map(|p| p.y).max().unwrap_or(0);
        for point in &bucket.points {
            let bar_count = if max_y == 0 {
                0
            } else {
                (BAR_WIDTH as u128 * point.y as u128 / max_y as u128) as usize
            };
            writeln!(
                out,
                "{:09}, {}.{:09} {}",
                point.x,
                point.y / NANOS_PER_SEC,
                point.y % NANOS_PER_SEC,
                "*".repeat(bar_count)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
