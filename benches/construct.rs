use criterion::{criterion_group, criterion_main, Criterion};

use hypercon::models::{construct, FrameTopology, SamplingParameters, ToLeds};

fn frame_topology(leds: u32) -> FrameTopology {
    FrameTopology {
        top_count: leds / 4,
        bottom_count: leds / 4,
        left_count: leds / 4,
        right_count: leds / 4,
        first_led_offset: (leds / 3) as i32,
        ..Default::default()
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let sampling = SamplingParameters {
        overlap_fraction: 0.25,
        ..Default::default()
    };

    for &leds in &[40, 400] {
        let topology = frame_topology(leds);

        c.bench_function(&format!("construct {} leds", topology.total_count()), |b| {
            b.iter(|| construct(&topology, &sampling).unwrap())
        });

        let placements = construct(&topology, &sampling).unwrap();
        c.bench_function(&format!("to_leds {} leds", placements.len()), |b| {
            b.iter(|| placements.to_leds())
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
