use crossterm::style::Color;

/// Generate a color for a pod name based on a character hash.
///
/// The hash sums `(c^2 / 2) + 1` over the name's code points, truncates,
/// and reduces modulo the palette size, so identical names always get
/// identical colors within and across runs. Collisions between different
/// names are fine.
pub fn color_for(name: &str) -> Color {
    // The six basic ANSI foregrounds (SGR 31-36).
    const PALETTE: [Color; 6] = [
        Color::DarkRed,
        Color::DarkGreen,
        Color::DarkYellow,
        Color::DarkBlue,
        Color::DarkMagenta,
        Color::DarkCyan,
    ];
    let sum: f64 = name
        .chars()
        .map(|c| (c as u32 as f64).powi(2) / 2.0 + 1.0)
        .sum();
    PALETTE[(sum as u64 % PALETTE.len() as u64) as usize]
}
