//! Serial logger for ESP32 targets

/// Install the `esp-println` logger, filtered by `ESP_LOG` at build time
pub fn init() {
    esp_println::logger::init_logger_from_env();
}
