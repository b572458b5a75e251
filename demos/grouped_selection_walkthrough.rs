use std::time::{Duration, Instant};

use chart_kit::api::{Chart, ChartConfig, ChartKind};
use chart_kit::core::DataPoint;
use chart_kit::error::ChartResult;
use chart_kit::layout::MeasuredBox;
use chart_kit::telemetry::init_default_tracing;

fn main() -> ChartResult<()> {
    let _ = init_default_tracing();

    let data = vec![
        DataPoint::new("Q1", 12.0).with_group("2023"),
        DataPoint::new("Q1", 15.0).with_group("2024"),
        DataPoint::new("Q2", 9.0).with_group("2023"),
        DataPoint::new("Q2", 18.0).with_group("2024"),
        DataPoint::new("Q3", 14.0).with_group("2023"),
        DataPoint::new("Q3", 11.0).with_group("2024"),
    ];
    let config = ChartConfig::new(ChartKind::GroupBar).with_size("100%", 360.0);
    let mut chart = Chart::new(config, data)?;
    chart.set_tooltip(|point| {
        let series = point.group.clone().unwrap_or_default();
        format!("{} {series}: {}", point.name, point.value)
    });
    chart.on_mouse_out(|| println!("pointer left the chart"));
    chart.mount();

    if chart.render()?.is_none() {
        println!("waiting for host measurement");
    }
    chart.set_measured(MeasuredBox::new(720.0, 480.0))?;

    let start = Instant::now();
    chart.hover(start, 3, Some((410.0, 120.0)));
    let report = chart.tick(start + Duration::from_millis(50), || None);
    println!("tooltip update: {:?}", report.tooltip);

    let outcome = chart.click_legend(1);
    println!("legend click: {outcome:?}");

    if let Some(frame) = chart.render()? {
        let x = frame.context.x.as_ref();
        println!("inner size: {:?}", frame.context.inner);
        println!("x ticks: {:?}", x.map(|axis| axis.tick_labels()));
        println!("bandwidth: {:?}", x.map(|axis| axis.bandwidth));
        println!("selection: {:?}", frame.selection.as_slice());
        println!("legend: {:?}", frame.legend);
        println!("tooltip: {:?}", frame.tooltip.map(|tooltip| tooltip.content));
    }
    println!("{}", chart.config_json_contract_v1_pretty()?);
    Ok(())
}
