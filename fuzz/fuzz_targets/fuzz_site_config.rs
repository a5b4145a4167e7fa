#![no_main]

use folio_core::config::SiteConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SiteConfig::from_toml_str(text) {
        assert!((0.0..=1.0).contains(&config.reveal.threshold));
        assert!(!config.shift.interval.is_zero());
        assert!(!config.theme.storage_key.trim().is_empty());
    }
});
