use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use pagefile::{FileHandle, Page, PageNum};
use tempfile::tempdir;

const PAGES: u32 = 256;

fn bench_block_io(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.pf");
    FileHandle::create(&path).unwrap();
    let mut fh = FileHandle::open(&path).unwrap();
    fh.ensure_capacity(PAGES).unwrap();

    let page = Page::filled(0x5A);
    let mut next = 0u32;
    c.bench_function("write_block", |b| {
        b.iter(|| {
            fh.write_block(PageNum::new(next % PAGES), black_box(&page))
                .unwrap();
            next = next.wrapping_add(7);
        })
    });

    let mut buf = Page::new();
    c.bench_function("read_block", |b| {
        b.iter(|| {
            fh.read_block(PageNum::new(next % PAGES), &mut buf).unwrap();
            next = next.wrapping_add(7);
            black_box(&buf);
        })
    });

    c.bench_function("sequential_read_next", |b| {
        b.iter(|| {
            fh.read_first_block(&mut buf).unwrap();
            while fh.read_next_block(&mut buf).is_ok() {}
        })
    });
}

fn bench_append(c: &mut Criterion) {
    // Each iteration appends to its own fresh one-page file.
    c.bench_function("append_empty_block", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let path = dir.path().join("append.pf");
                FileHandle::create(&path).unwrap();
                (FileHandle::open(&path).unwrap(), dir)
            },
            |(mut fh, dir)| {
                fh.append_empty_block().unwrap();
                (fh, dir)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_block_io, bench_append);
criterion_main!(benches);
