//! Human-readable formatting of byte and record counts.

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Formats a count as a short human-readable string with binary prefixes,
/// e.g. `human(102400) == "100K"`.
///
/// The exact thresholds and divisors are fixed for output compatibility with
/// the rest of the pipeline:
///
/// | range (n)           | output                         |
/// |---------------------|--------------------------------|
/// | n <= 1024           | raw decimal digits             |
/// | n <= 10240          | n/1024, 2 significant digits, K|
/// | n <= 1048576        | integer n/1024, K              |
/// | n <= 10485760       | n/1048576 decimal, M           |
/// | n <= 1073741824     | integer n/1048576, M           |
/// | otherwise           | n/2^30 decimal, G              |
///
/// # Examples
///
/// ```rust
/// use kmerbin::human;
///
/// assert_eq!(human(1024), "1024");
/// assert_eq!(human(1536), "1.5K");
/// assert_eq!(human(1048576), "1024K");
/// ```
pub fn human(count: u64) -> String {
    if count <= KIB {
        count.to_string()
    } else if count <= 10 * KIB {
        format!("{}K", significant(count as f64 / KIB as f64, 2))
    } else if count <= MIB {
        format!("{}K", count / KIB)
    } else if count <= 10 * MIB {
        format!("{}M", significant(count as f64 / MIB as f64, 6))
    } else if count <= GIB {
        format!("{}M", count / MIB)
    } else {
        format!("{}G", significant(count as f64 / GIB as f64, 6))
    }
}

/// Renders `x` with at most `sig` significant digits, trailing zeros (and a
/// bare decimal point) trimmed.
fn significant(x: f64, sig: i32) -> String {
    let integer_digits = if x < 1.0 {
        1
    } else {
        x.log10().floor() as i32 + 1
    };
    let decimals = (sig - integer_digits).max(0) as usize;
    let mut s = format!("{:.*}", decimals, x);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}
