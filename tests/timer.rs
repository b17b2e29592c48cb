use choreo::error::TimerError;
use choreo::timer::{sec_to_ticks, TickTimer, TimerDuration};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_sec_to_ticks_rounds_at_sixty_hertz() {
    let cases = [(0.0, 0), (0.5, 30), (1.0, 60), (2.5, 150), (1.0 / 60.0, 1), (0.49 / 60.0, 0)];
    for (seconds, ticks) in cases {
        assert_eq!(sec_to_ticks(seconds), ticks, "{seconds}s");
    }
}

#[test]
fn test_new_timer_is_stopped() {
    let mut timer = TickTimer::new(10);
    assert_that(&timer.is_running()).is_false();

    timer.tick();
    assert_that(&timer.elapsed_ticks()).is_equal_to(0);
}

#[test]
fn test_restart_then_n_ticks() {
    for n in [0u64, 1, 59, 60, 61, 250] {
        let mut timer = TickTimer::indefinite();
        timer.restart();

        let mut hits = 0;
        for _ in 0..n {
            timer.tick();
            if timer.at_second(n as f64 / 60.0) {
                hits += 1;
            }
        }

        assert_that(&timer.elapsed_ticks()).is_equal_to(n);
        // at_second(0) holds before the first tick, not during the run
        let expected = if n == 0 { 0 } else { 1 };
        assert_eq!(hits, expected, "n = {n}");
    }
}

#[test]
fn test_between_seconds_is_half_open() {
    let mut timer = TickTimer::new(120);
    timer.start();

    let mut inside = Vec::new();
    for _ in 0..120 {
        timer.tick();
        if timer.between_seconds(0.5, 1.0) {
            inside.push(timer.elapsed_ticks());
        }
    }

    assert_eq!(inside, (30..60).collect::<Vec<_>>());
}

#[test]
fn test_finite_timer_expires_and_keeps_counting() {
    let mut timer = TickTimer::new(3);
    timer.start();

    timer.tick();
    timer.tick();
    assert_that(&timer.has_expired()).is_false();
    assert_eq!(timer.remaining_ticks(), Ok(1));

    timer.tick();
    assert_that(&timer.has_expired()).is_true();

    timer.tick();
    assert_that(&timer.elapsed_ticks()).is_equal_to(4);
    assert_that(&timer.has_expired()).is_true();
    assert_eq!(timer.remaining_ticks(), Ok(0));
}

#[test]
fn test_remaining_ticks_of_indefinite_timer_fails() {
    let mut timer = TickTimer::indefinite();
    timer.start();
    timer.tick();

    assert_eq!(timer.remaining_ticks(), Err(TimerError::Indefinite));
}

#[test]
fn test_indefinite_timer_never_expires_by_itself() {
    let mut timer = TickTimer::indefinite();
    timer.restart_indefinitely();
    for _ in 0..10_000 {
        timer.tick();
    }
    assert_that(&timer.has_expired()).is_false();
}

#[test]
fn test_expire_indefinite_timer_keeps_elapsed() {
    let mut timer = TickTimer::indefinite();
    timer.restart_indefinitely();
    for _ in 0..7 {
        timer.tick();
    }

    timer.expire();

    assert_that(&timer.has_expired()).is_true();
    assert_that(&timer.elapsed_ticks()).is_equal_to(7);
}

#[test]
fn test_expire_finite_timer_jumps_to_duration() {
    let mut timer = TickTimer::new(90);
    timer.start();
    timer.tick();

    timer.expire();

    assert_that(&timer.elapsed_ticks()).is_equal_to(90);
    assert_that(&timer.has_expired()).is_true();
}

#[test]
fn test_restart_clears_forced_expiry() {
    let mut timer = TickTimer::indefinite();
    timer.restart_indefinitely();
    timer.expire();

    timer.restart();

    assert_that(&timer.has_expired()).is_false();
    assert_that(&timer.elapsed_ticks()).is_equal_to(0);
}

#[test]
fn test_stop_and_resume_preserve_progress() {
    let mut timer = TickTimer::new(10);
    timer.start();
    timer.tick();
    timer.tick();

    timer.stop();
    timer.tick();
    assert_that(&timer.elapsed_ticks()).is_equal_to(2);

    timer.resume();
    timer.tick();
    assert_that(&timer.elapsed_ticks()).is_equal_to(3);
}

#[test]
fn test_reset_rewinds_without_starting() {
    let mut timer = TickTimer::new(10);
    timer.start();
    timer.tick();

    timer.reset(TimerDuration::Ticks(20));

    assert_that(&timer.elapsed_ticks()).is_equal_to(0);
    assert_that(&timer.is_running()).is_false();
    assert_that(&timer.duration()).is_equal_to(TimerDuration::Ticks(20));
}

#[test]
fn test_restart_seconds_sets_duration() {
    let mut timer = TickTimer::indefinite();
    timer.restart_seconds(2.0);

    assert_that(&timer.duration()).is_equal_to(TimerDuration::Ticks(120));
    assert_that(&timer.is_running()).is_true();

    for _ in 0..30 {
        timer.tick();
    }
    assert_that(&timer.elapsed_seconds()).is_equal_to(0.5);
}
