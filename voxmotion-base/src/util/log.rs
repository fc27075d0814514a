//! Logging helpers shared by voxmotion programs.

/// Provides the recommended log filter for programs which want to exclude particularly noisy
/// details of voxmotion's dependencies.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every tick unless something is wrong. Per-tick
/// movement detail is logged at [`log::Level::Trace`] under the `voxmotion::physics` target
/// and is let through only when explicitly requested.
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    !(target.starts_with("tracing::span") // logs every single tracing span
        || target.starts_with("mio::") // noisy
        || target.starts_with("polling::")
        || (metadata.level() == log::Level::Trace && !target.starts_with("voxmotion")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter() {
        assert!(!standard_filter(
            &log::Metadata::builder().target("tracing::span::active").build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder()
                .target("voxmotion::physics::movement")
                .level(log::Level::Trace)
                .build()
        ));
        assert!(!standard_filter(
            &log::Metadata::builder()
                .target("some_random_crate")
                .level(log::Level::Trace)
                .build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder().target("some_random_crate").build()
        ));
    }
}
