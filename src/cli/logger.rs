use tracing_subscriber::EnvFilter;

/// Route `log` diagnostics to stderr through `tracing-subscriber`.
///
/// Other crates (reqwest, hyper) only get through from warn upwards.
pub fn init(verbose: bool, quiet: bool) {
    let directives = if quiet {
        "error"
    } else if verbose {
        "warn,text_to_mouth=debug"
    } else {
        "warn,text_to_mouth=info"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
