use std::time::{Duration, Instant};

use ghost_chase::compute::init_state;
use ghost_chase::config::GameConfig;
use ghost_chase::entities::*;
use ghost_chase::state::*;

use pretty_assertions::assert_eq;

fn loading() -> GameSession {
    init_state(GameConfig::default())
}

fn playing() -> GameSession {
    apply_event(&loading(), GameEvent::AssetsSettled)
}

fn active_handle(s: &GameSession) -> TimerHandle {
    s.timer.active.expect("timer should be running")
}

fn snapshot(s: &GameSession) -> (GameStatus, Actor, Ghost, Countdown) {
    (s.status, s.player.clone(), s.ghost.clone(), s.timer.clone())
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[test]
fn loading_starts_playing_once_assets_settle() {
    let s = playing();
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.timer.seconds_left, 30);
    assert_eq!(s.timer.active, Some(TimerHandle(1)));
}

#[test]
fn loading_ignores_everything_else() {
    let s = loading();
    for event in [
        GameEvent::SecondElapsed(TimerHandle(0)),
        GameEvent::SecondElapsed(TimerHandle(1)),
        GameEvent::PlayerCaught,
        GameEvent::ResetRequested,
    ] {
        let s2 = apply_event(&s, event);
        assert_eq!(snapshot(&s2), snapshot(&s));
    }
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn second_tick_counts_down() {
    let s = playing();
    let s2 = apply_event(&s, GameEvent::SecondElapsed(active_handle(&s)));
    assert_eq!(s2.timer.seconds_left, 29);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.timer.active, s.timer.active);
}

#[test]
fn stale_timer_ticks_are_ignored() {
    let s = playing();
    let stale = TimerHandle(active_handle(&s).0 + 7);
    let s2 = apply_event(&s, GameEvent::SecondElapsed(stale));
    assert_eq!(s2.timer, s.timer);
}

#[test]
fn timer_reaching_zero_wins() {
    let mut s = playing();
    s.timer.seconds_left = 1;
    let s2 = apply_event(&s, GameEvent::SecondElapsed(active_handle(&s)));
    assert_eq!(s2.status, GameStatus::Win);
    assert_eq!(s2.timer.seconds_left, 0);
    assert_eq!(s2.timer.active, None);
}

#[test]
fn capture_loses_and_freezes_timer() {
    let mut s = playing();
    s.timer.seconds_left = 17;
    let s2 = apply_event(&s, GameEvent::PlayerCaught);
    assert_eq!(s2.status, GameStatus::Lose);
    assert_eq!(s2.timer.seconds_left, 17);
    assert_eq!(s2.timer.active, None);
}

#[test]
fn reset_is_a_no_op_while_playing() {
    let mut s = playing();
    s.player.x = 333.0;
    s.timer.seconds_left = 10;
    let s2 = apply_event(&s, GameEvent::ResetRequested);
    assert_eq!(snapshot(&s2), snapshot(&s));
}

#[test]
fn playing_ignores_assets_settling_again() {
    let s = playing();
    let s2 = apply_event(&s, GameEvent::AssetsSettled);
    assert_eq!(snapshot(&s2), snapshot(&s));
}

// ── Win / Lose ────────────────────────────────────────────────────────────────

#[test]
fn finished_rounds_accept_only_reset() {
    for end in [GameStatus::Win, GameStatus::Lose] {
        let mut s = apply_event(&playing(), GameEvent::PlayerCaught);
        s.status = end;
        for event in [
            GameEvent::AssetsSettled,
            GameEvent::SecondElapsed(TimerHandle(1)),
            GameEvent::PlayerCaught,
        ] {
            let s2 = apply_event(&s, event);
            assert_eq!(snapshot(&s2), snapshot(&s));
        }
    }
}

#[test]
fn reset_respawns_and_restarts() {
    for end in [GameStatus::Win, GameStatus::Lose] {
        let mut s = apply_event(&playing(), GameEvent::PlayerCaught);
        s.status = end;
        s.player.x = 420.0;
        s.player.y = 320.0;
        s.ghost.body.x = 900.0;
        s.ghost.stuck_counter = 12;
        s.timer.seconds_left = 4;

        let s2 = apply_event(&s, GameEvent::ResetRequested);
        assert_eq!(s2.status, GameStatus::Playing);
        assert_eq!((s2.player.x, s2.player.y), (50.0, 50.0));
        assert_eq!((s2.ghost.body.x, s2.ghost.body.y), (700.0, 500.0));
        assert_eq!(s2.ghost.stuck_counter, 0);
        assert_eq!(s2.timer.seconds_left, 30);
        // A fresh handle, so ticks from the old run can't land
        assert_eq!(s2.timer.active, Some(TimerHandle(2)));
        assert_ne!(s2.timer.active, s.timer.active);
    }
}

#[test]
fn old_round_ticks_do_not_affect_new_round() {
    let first = playing();
    let old = active_handle(&first);
    let lost = apply_event(&first, GameEvent::PlayerCaught);
    let again = apply_event(&lost, GameEvent::ResetRequested);

    let s = apply_event(&again, GameEvent::SecondElapsed(old));
    assert_eq!(s.timer.seconds_left, 30);

    let s = apply_event(&s, GameEvent::SecondElapsed(active_handle(&again)));
    assert_eq!(s.timer.seconds_left, 29);
}

// ── SecondClock ───────────────────────────────────────────────────────────────

#[test]
fn clock_arms_then_ticks_every_second() {
    let t0 = Instant::now();
    let h = TimerHandle(1);
    let mut clock = SecondClock::new();

    assert_eq!(clock.poll(Some(h), t0), None);
    assert_eq!(clock.poll(Some(h), t0 + Duration::from_millis(999)), None);
    assert_eq!(clock.poll(Some(h), t0 + Duration::from_millis(1000)), Some(h));
    assert_eq!(clock.poll(Some(h), t0 + Duration::from_millis(1500)), None);
    assert_eq!(clock.poll(Some(h), t0 + Duration::from_millis(2000)), Some(h));
}

#[test]
fn clock_catches_up_after_a_stall() {
    let t0 = Instant::now();
    let h = TimerHandle(3);
    let mut clock = SecondClock::new();
    clock.poll(Some(h), t0);

    let late = t0 + Duration::from_millis(3500);
    let mut ticks = 0;
    while clock.poll(Some(h), late).is_some() {
        ticks += 1;
    }
    assert_eq!(ticks, 3);
}

#[test]
fn clock_rearms_when_handle_changes() {
    let t0 = Instant::now();
    let mut clock = SecondClock::new();
    clock.poll(Some(TimerHandle(1)), t0);

    // New run half a second later: the old schedule is cancelled
    let t1 = t0 + Duration::from_millis(500);
    assert_eq!(clock.poll(Some(TimerHandle(2)), t1), None);
    assert_eq!(clock.poll(Some(TimerHandle(2)), t0 + Duration::from_millis(1000)), None);
    assert_eq!(
        clock.poll(Some(TimerHandle(2)), t1 + Duration::from_millis(1000)),
        Some(TimerHandle(2))
    );
}

#[test]
fn clock_stops_when_timer_stops() {
    let t0 = Instant::now();
    let h = TimerHandle(1);
    let mut clock = SecondClock::new();
    clock.poll(Some(h), t0);
    assert_eq!(clock.poll(None, t0 + Duration::from_secs(5)), None);
    // Restarting the same handle arms from scratch
    assert_eq!(clock.poll(Some(h), t0 + Duration::from_secs(5)), None);
    assert_eq!(clock.poll(Some(h), t0 + Duration::from_secs(6)), Some(h));
}

#[test]
fn thirty_seconds_of_play_wins() {
    let t0 = Instant::now();
    let mut clock = SecondClock::new();
    let mut s = playing();

    // Poll ten times per simulated second, for 31 seconds
    for step in 0..=310u64 {
        let now = t0 + Duration::from_millis(step * 100);
        while let Some(h) = clock.poll(s.timer.active, now) {
            s = apply_event(&s, GameEvent::SecondElapsed(h));
        }
        if step == 290 {
            assert_eq!(s.status, GameStatus::Playing);
            assert_eq!(s.timer.seconds_left, 1);
        }
    }

    assert_eq!(s.status, GameStatus::Win);
    assert_eq!(s.timer.seconds_left, 0);
    assert_eq!(s.timer.active, None);
}
