use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tsuzuri_core::{FansubParser, ParserConfig};

const INPUTS: &[&str] = &[
    "[HorribleSubs] Working!!! - 07 [720p].mkv",
    "[Coalgirls]_Cross_Ange_01-03_(1280x720_Blu-ray_FLAC)",
    "[Commie] Teekyuu - 38 [76ADB77A].mkv",
    "[Group] Series OP1 [ABCD1234].mkv",
    "[Group].Series.OVA.2.[720p].mkv",
    "[Group] Series IX - Subtitle [BD 1080p HEVC-10bit].mkv",
];

fn bench_parse(c: &mut Criterion) {
    let parser = FansubParser::default_parser().unwrap();

    c.bench_function("parse_single", |b| {
        b.iter(|| parser.parse(black_box(INPUTS[0])).unwrap());
    });

    c.bench_function("parse_batch_6", |b| {
        b.iter(|| {
            for input in INPUTS {
                let _ = parser.parse(black_box(input));
            }
        });
    });
}

fn bench_memoization(c: &mut Criterion) {
    let memo = FansubParser::default_parser().unwrap();
    let plain = FansubParser::new(ParserConfig::new().with_memoize(false)).unwrap();

    c.bench_function("parse_batch_memo", |b| {
        b.iter(|| {
            for input in INPUTS {
                let _ = memo.parse(black_box(input));
            }
        });
    });

    c.bench_function("parse_batch_no_memo", |b| {
        b.iter(|| {
            for input in INPUTS {
                let _ = plain.parse(black_box(input));
            }
        });
    });
}

criterion_group!(benches, bench_parse, bench_memoization);
criterion_main!(benches);
