// cargo fuzz run decode corpus/decode -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;

use img2h::{Converter, Palette};

fuzz_target!(|data: &[u8]| {
    let converter =
        Converter::new(Palette::default()).max_image_sz(Some(1 << 20));
    if let Ok(fragment) = converter.convert_from(data, "fuzz.png", "fuzz") {
        let stream = fragment.stream();
        assert_eq!(
            stream.len(),
            stream.width() as usize * stream.height() as usize
        );
        assert!(stream.bytes().all(|b| b <= 1 || b == img2h::TRANSPARENT));
    }
});
