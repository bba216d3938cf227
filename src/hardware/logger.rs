// Cross platform logger to start logging at a given level on every target we ship haptics to.

//<Android>>>: uses android_logger to log messages to logcat.

//<Linux, iOS and macOS>>> uses env_logger for std output logging.

// Level sys: we use log::Level to set the maximum logging level. Defaults to Warn if None is used.

pub struct Logger;

impl Logger {
    pub fn start(level: Option<log::Level>) {
        let level = level.unwrap_or(log::Level::Warn);
        #[cfg(target_os = "android")]
        {
            android_logger::init_once(
                android_logger::Config::default().with_max_level(level.to_level_filter()),
            );
        }

        #[cfg(not(any(target_os = "android", target_arch = "wasm32")))]
        {
            if let Err(e) = env_logger::builder().filter_level(level.to_level_filter()).try_init() {
                log::debug!("Logger already started: {}", e);
            }
        }

        #[cfg(target_arch = "wasm32")]
        let _ = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_twice_is_harmless() {
        Logger::start(Some(log::Level::Debug));
        Logger::start(None);
        log::debug!("still logging");
    }
}
