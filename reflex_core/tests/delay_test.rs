use rand::rngs::StdRng;
use rand::SeedableRng;
use reflex_core::gameplay::delay::{DelaySource, DelayWindow, DelayWindows, RngDelay};
use reflex_core::Difficulty;

#[test]
fn test_default_windows() {
    let windows = DelayWindows::default();
    assert_eq!(windows.for_difficulty(Difficulty::Easy), DelayWindow::new(1000, 3000));
    assert_eq!(windows.for_difficulty(Difficulty::Normal), DelayWindow::new(2000, 5000));
    assert_eq!(windows.for_difficulty(Difficulty::Hard), DelayWindow::new(3000, 8000));
}

#[test]
fn test_random_delay_stays_in_half_open_window() {
    let windows = DelayWindows::default();
    let mut delay = RngDelay::new(StdRng::seed_from_u64(42));

    for difficulty in Difficulty::ALL {
        let window = windows.for_difficulty(difficulty);
        for _ in 0..2000 {
            let d = delay.delay_for(window);
            assert!(window.contains(d), "{difficulty}: {d} outside {window:?}");
        }
    }
}

#[test]
fn test_seeded_delay_is_reproducible() {
    let window = DelayWindow::new(2000, 5000);
    let mut a = RngDelay::new(StdRng::seed_from_u64(7));
    let mut b = RngDelay::new(StdRng::seed_from_u64(7));
    let xs: Vec<u64> = (0..10).map(|_| a.delay_for(window)).collect();
    let ys: Vec<u64> = (0..10).map(|_| b.delay_for(window)).collect();
    assert_eq!(xs, ys);
}

#[test]
fn test_single_value_window() {
    let mut delay = RngDelay::new(StdRng::seed_from_u64(1));
    assert_eq!(delay.delay_for(DelayWindow::new(1500, 1501)), 1500);
}
