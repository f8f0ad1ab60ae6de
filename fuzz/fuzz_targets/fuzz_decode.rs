#![no_main]
use libfuzzer_sys::fuzz_target;
use zenktx::Image;

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode: must never panic
    let _ = zenktx::decode_config(data);
    let Ok(decoded) = zenktx::decode(data, enough::Unstoppable) else {
        return;
    };

    // Query every pixel, plus a ring just outside the bounds
    let r = decoded.bounds();
    if u64::from(r.width()) * u64::from(r.height()) > 1 << 20 {
        return;
    }
    for y in r.min_y - 1..=r.max_y {
        for x in r.min_x - 1..=r.max_x {
            let _ = decoded.pixel_at(x, y).to_rgba64();
        }
    }
    for kv in decoded.key_values() {
        let _ = kv.key_str();
    }
});
