use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    thread,
    time::{Duration, SystemTime},
};

use metrics_gauge::{track, GaugeBuilder, LabelKey, LabelValue, Metric, MetricProducer};
use tracing::info;

fn print_metric(metric: &Metric) {
    let descriptor = metric.descriptor();
    for series in metric.time_series() {
        let labels = series
            .label_values()
            .iter()
            .map(|value| value.as_ref().map_or("-", LabelValue::value))
            .collect::<Vec<_>>()
            .join(",");
        for point in series.points() {
            info!(
                name = descriptor.name(),
                unit = descriptor.unit(),
                labels = %labels,
                value = ?point.value(),
                "Exported time series."
            );
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let in_flight = GaugeBuilder::new("requests_in_flight")
        .with_description("Requests currently being served")
        .with_label_key(LabelKey::new("method", "HTTP method"))
        .build_long();
    let queue_depth = GaugeBuilder::new("queue_depth")
        .with_description("Jobs waiting to be picked up")
        .with_unit("jobs")
        .with_label_key(LabelKey::new("queue", "Queue name"))
        .build_derived_long();

    let urgent = Arc::new(Mutex::new(VecDeque::from([1, 2, 3])));
    let batch = Arc::new(Mutex::new((0..10).collect::<VecDeque<_>>()));
    queue_depth
        .create_time_series(["urgent"], track(&urgent, |q: &Mutex<VecDeque<u32>>| {
            q.lock().map_or(0, |q| q.len())
        }))
        .expect("one label value per key");
    queue_depth
        .create_time_series(["batch"], track(&batch, |q: &Mutex<VecDeque<u32>>| {
            q.lock().map_or(0, |q| q.len())
        }))
        .expect("one label value per key");

    let producers: [&dyn MetricProducer; 2] = [&in_flight, &queue_depth];
    for round in 0..3 {
        let gets = in_flight.get_or_create_time_series(["GET"]).expect("one label value per key");
        gets.add(2).expect("integer input");
        in_flight.get_or_create_default_time_series().set(round).expect("integer input");

        if let Ok(mut queue) = urgent.lock() {
            queue.pop_front();
        }

        info!(round, "Collecting gauges.");
        for metric in producers.iter().filter_map(|p| p.get_metric(SystemTime::now())) {
            print_metric(&metric);
        }

        thread::sleep(Duration::from_millis(100));
    }

    // The batch queue stops being reported once it is gone.
    drop(batch);
    if let Some(metric) = queue_depth.get_metric(SystemTime::now()) {
        print_metric(&metric);
    }
}
