#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and full decode must never panic.
    let _ = zentga::ImageInfo::from_bytes(data);
    let limits = zentga::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let decoded = zentga::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    if let Ok(image) = decoded {
        assert_eq!(
            image.pixels().len(),
            image.width as usize * image.height as usize * 4
        );
    }

    // The RLE stream on its own, with a bounded output size.
    if let Some((&unit, rest)) = data.split_first() {
        let unit = usize::from(unit % 4) + 1;
        let _ = zentga::tga::decode_rle(rest, unit, unit * 64);
    }
});
