use rand::Rng;
use restep::{timestamp, Duration, MetricValue, Point, Rate, Resample, Value};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> restep::Result<()> {
    env_logger::builder()
        .filter_module("restep", log::LevelFilter::Trace)
        .parse_default_env()
        .init();

    let mut rng = rand::thread_rng();

    let end = timestamp();
    let start = end - Duration::minutes(15);

    // Simulate a scraper reporting roughly every 10 seconds, with jitter
    // and the occasional dropped observation
    let mut points = Vec::new();
    let mut ts = start;

    while ts < end {
        let value: Value = 50.0 + rng.gen_range(-5.0..5.0);

        if rng.gen_bool(0.95) {
            points.push(Point::new(ts, Some(MetricValue::Gauge(value))));
        } else {
            points.push(Point::new(ts, None));
        }

        ts += Duration::millis(9_500 + rng.gen_range(0..1_000));
    }

    log::info!("generated {} samples", points.len());

    let plan = Resample::range(start, end).step(Duration::minutes(1));

    let averaged = plan.average(points.iter().copied())?;
    log::info!("average: {averaged:#?}");

    let rolled = plan
        .heartbeat(Duration::minutes(5))
        .rollup(points.iter().copied())?;
    log::info!("rollup: {rolled:#?}");

    let rates = Rate::new(points.into_iter()).skip(1).collect::<Vec<_>>();
    log::info!("computed {} rates", rates.len());

    Ok(())
}
