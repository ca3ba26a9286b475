use criterion::BenchmarkId;
use criterion::Criterion;

use criterion::criterion_group;
use criterion::criterion_main;
use group_stage::arena::Match;
use group_stage::arena::MatchSimulationBuilder;
use group_stage::arena::competition::{GenerationContext, GroupStage, TeamFactory};
use group_stage::core::Team;
use rand::{SeedableRng, rngs::StdRng};

const TURN_BUDGETS: [usize; 4] = [10, 40, 100, 1_000];

fn teams(rng: &mut StdRng) -> (Team, Team) {
    let mut ctx = GenerationContext::default();
    let factory = TeamFactory::default();
    let home = factory.create(&mut ctx, rng).unwrap();
    let away = factory.create(&mut ctx, rng).unwrap();
    (home, away)
}

fn run_one_match(home: &Team, away: &Team, turn_budget: usize, rng: &mut StdRng) -> Match {
    let mut sim = MatchSimulationBuilder::default()
        .home(home)
        .away(away)
        .turn_budget(turn_budget)
        .build()
        .unwrap();
    sim.run(rng).unwrap();
    sim.into_game()
}

fn bench_match_turn_budget(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(420);
    let (home, away) = teams(&mut rng);

    let mut group = c.benchmark_group("match_turn_budget");
    for turn_budget in TURN_BUDGETS {
        group.bench_with_input(
            BenchmarkId::from_parameter(turn_budget),
            &turn_budget,
            |b, turn_budget| {
                b.iter(|| run_one_match(&home, &away, *turn_budget, &mut rng));
            },
        );
    }
    group.finish();
}

fn bench_group_stage(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(420);
    c.bench_function("group_stage", |b| {
        b.iter(|| {
            let mut stage = GroupStage::generate(&mut rng).unwrap();
            stage.simulate_all(&mut rng).unwrap();
            stage
        });
    });
}

criterion_group!(benches, bench_match_turn_budget, bench_group_stage);
criterion_main!(benches);
