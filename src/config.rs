//! Config handling

use tracing::log::LevelFilter;

/// Sets up logging based on the debug flag
///
/// Stays quiet at `Warn` unless debugging, stdout is reserved for progress
/// lines and the `MEDIA:` token.
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("rustls", LevelFilter::Error)
            .with_module_level("hyper_util", LevelFilter::Error)
            .with_module_level("h2", LevelFilter::Error)
            .with_module_level("reqwest", LevelFilter::Error);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let _ = setup_logging(true);
        assert!(setup_logging(true).is_err());
    }
}
