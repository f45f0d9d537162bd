#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let doc = opml::parse(s);
        assert_eq!(doc.flatten().len(), doc.iter().count());
        let _ = opml::try_parse(s);
    }
});
