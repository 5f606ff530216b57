//! Debug-logging bootstrap, gated behind the `setup_tracing` feature.
//!
//! When enabled, a `tracing_subscriber` is installed at load time if the
//! `DEBUG_PLANARTREE` environment variable is set to a truthy value.
//! Without the feature (the default), `tracing` macros throughout the
//! crate remain inert unless the embedding application installs its own
//! subscriber.

#[cfg(feature = "setup_tracing")]
#[ctor::ctor]
fn set_debug_level() {
    let enabled = std::env::var("DEBUG_PLANARTREE")
        .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty()))
        .unwrap_or(false);
    if enabled {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
}
