#![no_main]

use libfuzzer_sys::fuzz_target;
use plantkit_core::wizard::{parse_step_fragment, step_fragment};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let total = usize::from(data[0] % 16) + 1;
    let Ok(fragment) = std::str::from_utf8(&data[1..]) else {
        return;
    };

    let index = parse_step_fragment(fragment, total);
    assert!(index < total, "index {index} out of range for {total} steps");

    // Canonical fragments round-trip.
    assert_eq!(parse_step_fragment(&step_fragment(index), total), index);
});
