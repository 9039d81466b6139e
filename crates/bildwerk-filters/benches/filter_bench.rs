// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the canned filters in the bildwerk-filters crate.
// Each filter runs on the same synthetic 320x240 photo, including PNG
// encoding, which is what the studio page pays per selection change.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};

use bildwerk_core::FilterKind;
use bildwerk_filters::ImageProcessor;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Build a 320x240 image: a horizontal colour gradient with a bright
/// rectangle in the middle, so the edge and cartoon filters have something
/// to find.
fn synthetic_photo() -> RgbImage {
    RgbImage::from_fn(320, 240, |x, y| {
        if (80..240).contains(&x) && (60..180).contains(&y) {
            Rgb([245, 230, 60])
        } else {
            Rgb([(x * 255 / 320) as u8, (y * 255 / 240) as u8, 96])
        }
    })
}

fn bench_filters(c: &mut Criterion) {
    let processor = ImageProcessor::from_rgb(synthetic_photo()).expect("non-empty image");
    let mut group = c.benchmark_group("apply (320x240)");

    for kind in FilterKind::ALL {
        group.bench_function(kind.label(), |b| {
            b.iter(|| {
                let processed = processor.apply(black_box(kind)).expect("filter");
                black_box(processed.into_png_bytes());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
