use leptos::prelude::*;

/// Headline number with a caption, as used across the stats pages.
#[component]
pub fn StatCard(
    /// Caption above the number
    title: &'static str,
    value: i64,
) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <div class="card-title">{title}</div>
            <div class="stat-value">{format_count(value)}</div>
        </div>
    }
}

/// Thousands separated with commas.
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(-4200), "-4,200");
    }
}
