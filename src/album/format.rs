/// Format seconds as `M:SS`. Minutes are not padded; unknown (`NaN`) or
/// infinite input renders as `-:--`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "-:--".to_string();
    }

    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor();
    let rest = (seconds - minutes * 60.0).floor();

    if rest < 10.0 {
        format!("{}:0{}", minutes as u64, rest as u64)
    } else {
        format!("{}:{}", minutes as u64, rest as u64)
    }
}
