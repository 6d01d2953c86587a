//! Benchmarks for building the rendered list
//!
//! Run with: cargo bench --bench projection

mod support;

use support::make_snapshot;
use tablist::filter::compile;
use tablist::keymap::KeyCode;
use tablist::messages::Msg;
use tablist::model::{SessionMode, TabDirectory};
use tablist::projection::project;
use tablist::update::update;
use tablist::{PopupConfig, PopupModel};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn directory(mode: SessionMode, windows: usize, tabs: usize) -> TabDirectory {
    let mut dir = TabDirectory::new(mode);
    dir.ingest(make_snapshot(windows, tabs));
    dir
}

// ============================================================================
// Ingest
// ============================================================================

#[divan::bench(args = [10, 100, 500])]
fn ingest_all_windows(bencher: divan::Bencher, tabs: usize) {
    bencher
        .with_inputs(|| make_snapshot(4, tabs))
        .bench_values(|snapshot| {
            let mut dir = TabDirectory::new(SessionMode::AllWindows);
            dir.ingest(snapshot);
            divan::black_box(dir.tab_count())
        });
}

// ============================================================================
// Projection
// ============================================================================

#[divan::bench(args = [10, 100, 500])]
fn project_single_window_grouped(bencher: divan::Bencher, tabs: usize) {
    let dir = directory(SessionMode::CurrentWindow, 1, tabs);
    bencher.bench_local(|| divan::black_box(project(&dir, None)));
}

#[divan::bench(args = [10, 100, 500])]
fn project_all_windows(bencher: divan::Bencher, tabs: usize) {
    let dir = directory(SessionMode::AllWindows, 4, tabs);
    bencher.bench_local(|| divan::black_box(project(&dir, None)));
}

#[divan::bench(args = ["g", "page 1", "zzz"])]
fn project_filtered(bencher: divan::Bencher, query: &str) {
    let dir = directory(SessionMode::AllWindows, 4, 250);
    let filter = compile(query);
    bencher.bench_local(|| divan::black_box(project(&dir, filter.as_ref())));
}

// ============================================================================
// Typing into the filter box
// ============================================================================

#[divan::bench(args = [100, 500])]
fn type_query(bencher: divan::Bencher, tabs: usize) {
    bencher
        .with_inputs(|| {
            let mut model = PopupModel::new(PopupConfig::default());
            update(&mut model, Msg::snapshot(make_snapshot(4, tabs)));
            model
        })
        .bench_local_values(|mut model| {
            let mut text = String::new();
            for ch in "github".chars() {
                text.push(ch);
                update(&mut model, Msg::key_up(KeyCode::Char(ch), text.as_str()));
            }
            divan::black_box(model.navigation.bound())
        });
}
