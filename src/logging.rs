/// Logging setup for the command-line front end
///
/// The library itself only emits records through the `log` facade:
/// `debug!` for per-stage counts, `warn!` when input data is degraded or a
/// train is dropped from a batch. Binaries call [`init`] once at startup.
///
/// The default filter is `info`; set `RUST_LOG` to override it, e.g.
/// `RUST_LOG=rail_precedence=debug`.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A second initialisation (tests, embedding) keeps the first logger
    let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
}

/// Run `f` and log how long it took at debug level when `perf_timing` is enabled
#[inline]
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    #[cfg(feature = "perf_timing")]
    {
        let start = std::time::Instant::now();
        let out = f();
        log::debug!("{label}: {:?}", start.elapsed());
        out
    }
    #[cfg(not(feature = "perf_timing"))]
    {
        let _ = label;
        f()
    }
}
