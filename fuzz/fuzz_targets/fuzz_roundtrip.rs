#![no_main]
use libfuzzer_sys::fuzz_target;
use zenktx::*;

fuzz_target!(|data: &[u8]| {
    // Writing each pixel back in its own format must leave the buffer unchanged
    let Ok(mut decoded) = decode(data, enough::Unstoppable) else {
        return;
    };
    let Some(planar) = decoded.image_mut().as_planar_mut() else {
        return;
    };
    let r = planar.bounds();
    if u64::from(r.width()) * u64::from(r.height()) > 1 << 20 {
        return;
    }
    let before = planar.pixels().to_vec();
    for y in r.min_y..r.max_y {
        for x in r.min_x..r.max_x {
            let c = planar.pixel_at(x, y);
            planar.set_pixel(x, y, c);
        }
    }
    assert_eq!(planar.pixels(), &before[..], "pixel rewrite changed the buffer");
});
