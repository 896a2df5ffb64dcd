use tracing::{error, info, info_span};
use tracing_log_observer::{observe_tracing, ObserverConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

fn main() {
    let (layer, logs) = observe_tracing(ObserverConfig::default());

    // Print to the console as well, next to capturing.
    let subscriber = Registry::default()
        .with(layer.with_span_groups(true))
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");

    info!("starting service");
    let span = info_span!("login", user_id = 42);
    let _entered = span.enter();
    error!(reason = "invalid password", "authentication failed");

    for record in logs.all() {
        println!("{}", serde_json::to_string(&record).expect("serialize record"));
    }
}
