use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use cubedrill::deck::Item;
use cubedrill::engine::selector::pick_next;

fn make_pool(count: usize) -> Vec<Item> {
    (0..count).map(|i| Item::new(format!("case{i}.png"))).collect()
}

fn bench_pick_sequence(c: &mut Criterion) {
    for size in [7, 57] {
        let pool = make_pool(size);
        c.bench_function(&format!("pick_next x100 (pool of {size})"), |b| {
            b.iter(|| {
                let mut rng = SmallRng::seed_from_u64(0);
                let mut history = Vec::new();
                for _ in 0..100 {
                    let pick = pick_next(black_box(&pool), &history, &mut rng);
                    if let Some(pick) = pick {
                        history = pick.history;
                    }
                }
                history
            })
        });
    }
}

fn bench_stale_history(c: &mut Criterion) {
    // History mostly made of cases that were toggled off
    let pool = make_pool(21);
    let history: Vec<Item> = (40..43).map(|i| Item::new(format!("case{i}.png"))).collect();
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("pick_next with stale history", |b| {
        b.iter(|| pick_next(black_box(&pool), black_box(&history), &mut rng))
    });
}

criterion_group!(benches, bench_pick_sequence, bench_stale_history);
criterion_main!(benches);
