use leptos::prelude::*;
use quill_types::DailyTraffic;

const WIDTH: f32 = 600.0;
const HEIGHT: f32 = 160.0;
const GAP: f32 = 2.0;

/// Bar heights scaled so the busiest day fills `height`.
pub fn bar_heights(points: &[DailyTraffic], height: f32) -> Vec<f32> {
    let peak = points.iter().map(|p| p.views).max().unwrap_or(0);
    if peak <= 0 {
        return vec![0.0; points.len()];
    }
    points
        .iter()
        .map(|p| height * (p.views.max(0) as f32 / peak as f32))
        .collect()
}

/// SVG bar chart of daily views.
#[component]
pub fn TrafficChart(points: Vec<DailyTraffic>) -> impl IntoView {
    if points.is_empty() {
        return view! { <p class="empty-state">"No traffic recorded in this period."</p> }.into_any();
    }

    let barWidth = (WIDTH / points.len() as f32 - GAP).max(1.0);
    let heights = bar_heights(&points, HEIGHT);

    let bars = points
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(i, (point, h))| {
            let x = i as f32 * (barWidth + GAP);
            let tip = format!(
                "{}: {} views, {} visitors",
                point.date, point.views, point.unique_visitors
            );
            view! {
                <rect
                    class="traffic-bar"
                    x=format!("{x}")
                    y=format!("{}", HEIGHT - h)
                    width=format!("{barWidth}")
                    height=format!("{h}")
                >
                    <title>{tip}</title>
                </rect>
            }
        })
        .collect_view();

    view! {
        <svg
            class="traffic-chart"
            viewBox=format!("0 0 {WIDTH} {HEIGHT}")
            preserveAspectRatio="none"
        >
            {bars}
        </svg>
    }
        .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, views: i64) -> DailyTraffic {
        DailyTraffic {
            date: date.into(),
            views,
            unique_visitors: views / 2,
        }
    }

    #[test]
    fn busiest_day_fills_the_chart() {
        let points = vec![day("2024-03-01", 10), day("2024-03-02", 40), day("2024-03-03", 20)];
        assert_eq!(bar_heights(&points, 100.0), vec![25.0, 100.0, 50.0]);
    }

    #[test]
    fn quiet_period_draws_flat_bars() {
        let points = vec![day("2024-03-01", 0), day("2024-03-02", 0)];
        assert_eq!(bar_heights(&points, 100.0), vec![0.0, 0.0]);
        assert!(bar_heights(&[], 100.0).is_empty());
    }
}
