use tracing_log_observer::{observe, Attr, Level, Logger, ObserverConfig};

fn main() {
    let (handler, logs) = observe(ObserverConfig::new().max_logs(100));
    let logger = Logger::new(handler).with(vec![Attr::string("service", "auth")]);

    logger.info("starting service", vec![]);
    logger
        .with_group("request")
        .with(vec![Attr::string("method", "POST")])
        .error(
            "authentication failed",
            vec![Attr::int("user_id", 42), Attr::string("reason", "invalid password")],
        );

    for record in logs.filter_level_exact(Level::ERROR).all() {
        println!("{} {} {}", record.level, record.message, serde_json::Value::Object(record.attrs_map()));
    }
    println!("captured {} records", logs.len());
}
