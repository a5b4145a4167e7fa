#![no_main]

use folio_core::geometry::RootMargin;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(margin) = RootMargin::parse(text) {
        let printed = margin.to_string();
        let reparsed = RootMargin::parse(&printed).expect("printed margin must parse");
        assert_eq!(reparsed.to_string(), printed);
    }
});
