#![no_main]

use arbitrary::Arbitrary;
use folio_core::geometry::{Rect, intersection_ratio};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    target: (i16, i16, u16, u16),
    root: (i16, i16, u16, u16),
}

fn rect((x, y, w, h): (i16, i16, u16, u16)) -> Rect {
    Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
}

fuzz_target!(|input: Input| {
    let ratio = intersection_ratio(&rect(input.target), &rect(input.root));
    assert!((0.0..=1.0).contains(&ratio), "ratio {ratio} out of range");
});
