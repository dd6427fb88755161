use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_fronton::core::{MatchSnapshot, MatchState};
use tui_fronton::term::{FrameBuffer, GameView, Viewport};
use tui_fronton::types::{FrameInput, Silent};

fn playing(balls: usize) -> MatchState {
    let mut state = MatchState::new(12345);
    state.spawn_default_ball();
    for _ in 1..balls {
        state.spawn_ball(7, Default::default(), 4, 4);
    }
    state.step(FrameInput::confirm(), &mut Silent);
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = playing(1);
    c.bench_function("tick_one_ball", |b| {
        b.iter(|| {
            state.tick(black_box(FrameInput::IDLE), &mut Silent);
        })
    });

    let mut state = playing(8);
    c.bench_function("tick_eight_balls", |b| {
        b.iter(|| {
            state.tick(black_box(FrameInput::right()), &mut Silent);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = playing(8);
    let mut snap = MatchSnapshot::default();
    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = playing(8);
    let snap = state.snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(120, 40);
    c.bench_function("render_into_120x40", |b| {
        b.iter(|| {
            view.render_into(black_box(&snap), Viewport::new(120, 40), &mut fb);
        })
    });
}

criterion_group!(benches, bench_tick, bench_snapshot, bench_render);
criterion_main!(benches);
