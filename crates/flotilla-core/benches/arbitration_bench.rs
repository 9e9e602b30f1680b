use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use flotilla_core::action::Action;
use flotilla_core::entity::{PlayerId, Ship, ShipId, Structure, StructureKind};
use flotilla_core::protocol::GameConstants;
use flotilla_core::shoal::{Coord, ResourceField, Torus};
use flotilla_core::strategy::Plan;
use flotilla_core::{Arbiter, Overmind, OvermindConfig, TurnSnapshot};

/// A 32x32 match with `ships` ships packed around player 0's yard.
fn crowded_snapshot(seed: u64, ships: u32) -> TurnSnapshot {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let torus = Torus::new(32, 32).unwrap();
    let amounts = (0..torus.area()).map(|_| rng.gen_range(0..600)).collect();
    let field = ResourceField::from_rows(torus, amounts).unwrap();

    let mut snapshot = TurnSnapshot::new(GameConstants::default(), 2, PlayerId::new(0), field);
    snapshot.add_structure(Structure::new(PlayerId::new(0), Coord::new(8, 8), StructureKind::Shipyard));
    snapshot.add_structure(Structure::new(PlayerId::new(1), Coord::new(24, 24), StructureKind::Shipyard));
    snapshot.begin_frame(0);
    snapshot.set_budget(PlayerId::new(0), 5000);

    // Ships fill an 8-wide block so most of them contend for neighbours
    for id in 0..ships {
        let x = 4 + (id % 8) as i32;
        let y = 4 + (id / 8) as i32;
        let owner = PlayerId::new(id % 2);
        snapshot.insert_ship(Ship::new(ShipId::new(id), owner, Coord::new(x, y), rng.gen_range(0..1000)));
    }
    snapshot.finish_frame();
    snapshot
}

fn random_plans(snapshot: &TurnSnapshot, seed: u64) -> BTreeMap<ShipId, Plan> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    snapshot
        .ships()
        .map(|ship| {
            let mut prefs = Action::MOVES.to_vec();
            prefs.rotate_left(rng.gen_range(0..4));
            prefs.push(Action::Stay);
            (ship.id, Plan::new(prefs))
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let snapshot = crowded_snapshot(1, 64);
    let plans = random_plans(&snapshot, 2);
    let arbiter = Arbiter::default();

    c.bench_function("resolve_64_ships", |b| {
        b.iter(|| black_box(arbiter.resolve(&snapshot, black_box(&plans)).unwrap()))
    });
}

fn bench_overmind_step(c: &mut Criterion) {
    let snapshot = crowded_snapshot(3, 64);
    let mut overmind = Overmind::prospector(OvermindConfig::default());

    c.bench_function("overmind_step_64_ships", |b| {
        b.iter(|| {
            let mut snap = snapshot.clone();
            black_box(overmind.step(&mut snap).unwrap())
        })
    });
}

criterion_group!(benches, bench_resolve, bench_overmind_step);
criterion_main!(benches);
