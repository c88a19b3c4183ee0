use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays clean for values. Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = autumn_props::run() {
        eprintln!("autumn-props: {e}");
        std::process::exit(1);
    }
}
