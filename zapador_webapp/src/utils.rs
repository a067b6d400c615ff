/// Helper function to build a 64-bit seed out of JavaScript's Math.random.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let hi = (random() * f64::from(u32::MAX)) as u64;
    let lo = (random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}

/// Timer text as `m:ss`.
pub(crate) fn format_elapsed(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
