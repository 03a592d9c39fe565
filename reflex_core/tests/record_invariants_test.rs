use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reflex_core::config::GameConfig;
use reflex_core::gameplay::delay::RngDelay;
use reflex_core::gameplay::machine::GameMachine;
use reflex_core::store::MemoryStore;
use reflex_core::time::clock::ManualClock;
use reflex_core::Difficulty;

#[test]
fn test_counters_hold_under_random_operation_sequences() {
    for seed in 0..20 {
        let mut driver = StdRng::seed_from_u64(seed);
        let clock = ManualClock::new(0);
        let mut machine = GameMachine::new(
            GameConfig::default(),
            clock.clone(),
            RngDelay::new(StdRng::seed_from_u64(seed + 1000)),
            MemoryStore::new(),
        );

        let mut prior_best = 0;
        for _ in 0..400 {
            match driver.gen_range(0..100) {
                0..=19 => {
                    machine.start();
                }
                20..=49 => {
                    machine.tap();
                }
                50..=54 => {
                    let d = Difficulty::ALL[driver.gen_range(0..3)];
                    machine.select_difficulty(d);
                }
                55..=56 => {
                    machine.reset();
                    prior_best = 0;
                }
                _ => {
                    clock.advance(driver.gen_range(1..1500));
                    machine.poll();
                }
            }

            let record = machine.record();
            assert!(record.is_consistent(), "seed {seed}: {record:?}");
            assert!(record.best_streak >= prior_best, "seed {seed}: best streak decreased");
            prior_best = record.best_streak;
        }
    }
}

#[test]
fn test_reset_twice_equals_reset_once() {
    let clock = ManualClock::new(0);
    let mut machine = GameMachine::new(
        GameConfig::default(),
        clock.clone(),
        RngDelay::new(StdRng::seed_from_u64(3)),
        MemoryStore::new(),
    );
    machine.start();
    clock.advance(3000);
    machine.poll();
    machine.tap();

    machine.reset();
    let once = machine.record().clone();
    machine.reset();
    assert_eq!(machine.record(), &once);
    assert_eq!(once, Default::default());
}
