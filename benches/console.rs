//! Console benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dual_clock::clock::{render_frame, CalendarTime};
use dual_clock::core::{Console, ScreenId, Surface};
use dual_clock::present::{FrameHeap, Presenter, TextModeDriver};

fn console() -> Console<TextModeDriver> {
    let driver = TextModeDriver::new()
        .with_screen(ScreenId::Tv, 27, 80)
        .with_screen(ScreenId::Drc, 18, 80);
    let surfaces = vec![
        Surface::new(ScreenId::Tv, 27, 80).unwrap(),
        Surface::new(ScreenId::Drc, 18, 80).unwrap(),
    ];
    Console::new(surfaces, Presenter::new(driver, FrameHeap::new(64 * 1024)))
}

fn bench_surface_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");

    let text: String = (0..100)
        .map(|i| format!("Line {}: Some text content here\n", i))
        .collect();
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("scroll", |b| {
        b.iter(|| {
            let mut surface = Surface::new(ScreenId::Tv, 27, 80).unwrap();
            surface.write_str(&text);
            black_box(surface)
        })
    });

    group.finish();
}

fn bench_clock_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("console");
    let at = CalendarTime::from_unix(1_700_000_000, 0).unwrap();

    group.bench_function("frame_background", |b| {
        let mut console = console();
        b.iter(|| {
            console.clear();
            render_frame(&mut console, black_box(&at));
        })
    });

    group.bench_function("frame_foreground", |b| {
        let mut console = console();
        console.acquire_foreground().unwrap();
        b.iter(|| {
            console.clear();
            render_frame(&mut console, black_box(&at));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_surface_scroll, bench_clock_frame);
criterion_main!(benches);
