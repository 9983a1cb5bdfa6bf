//! The monthly spending line chart.
//!
//! The chart is generated as JSON configuration for the ECharts library.
//! Its initialization script is rendered inline right after the chart
//! container, so it also runs when htmx swaps a refreshed dashboard in.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::Line,
};
use maud::{Markup, PreEscaped, html};

use crate::dashboard::spending::SpendingPoint;

/// The HTML element ID of the spending chart container.
pub(super) const SPENDING_CHART_ID: &str = "spending-chart";

/// Renders the chart container followed by its initialization script.
pub(super) fn spending_chart_view(points: &[SpendingPoint], month: &str) -> Markup {
    let options = spending_chart(points, month).to_string();

    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{SPENDING_CHART_ID}");
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);
        }})();"#
    );

    html!(
        div
            id=(SPENDING_CHART_ID)
            class="min-h-[300px] w-full rounded bg-white dark:bg-gray-100"
        {}

        script { (PreEscaped(script)) }
    )
}

pub(super) fn spending_chart(points: &[SpendingPoint], month: &str) -> Chart {
    let labels: Vec<String> = points
        .iter()
        .map(|point| point.day_of_month.to_string())
        .collect();
    let values: Vec<f64> = points.iter().map(|point| point.amount).collect();

    Chart::new()
        .title(Title::new().text("Monthly Spending").subtext(month))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Spend").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
