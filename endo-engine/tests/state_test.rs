use std::time::Duration;

use approx::assert_relative_eq;
use endo_engine::navigation::{
    NavigationEvent, NavigationState, PathSequence, PlaybackConfig, PlaybackError, PlaybackState,
};

fn corner_path() -> PathSequence {
    PathSequence::from_positions(&[0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 10.0, 0.0]).unwrap()
}

fn loaded_state(loop_mode: bool) -> NavigationState {
    let mut state = NavigationState::new(PlaybackConfig {
        loop_mode,
        ..PlaybackConfig::default()
    });
    state.set_path(corner_path());
    state.drain_events();
    state
}

fn navigated_indices(events: &[NavigationEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            NavigationEvent::Navigated { index, .. } => Some(*index),
            NavigationEvent::PlaybackEnded => None,
        })
        .collect()
}

#[test]
fn set_path_resets_cursor_and_reports_it() {
    let mut state = NavigationState::default();
    state.set_path(corner_path());

    assert_eq!(state.current_index(), Some(0));
    assert_eq!(state.total_nodes(), 3);
    assert_eq!(navigated_indices(&state.drain_events()), vec![0]);
    assert!(state.drain_events().is_empty());
}

#[test]
fn set_path_stops_autoplay() {
    let mut state = loaded_state(false);
    assert!(state.start_autoplay(Duration::from_millis(100)));
    state.move_to_next();

    state.set_path(corner_path());

    assert_eq!(state.playback_state(), PlaybackState::Idle);
    assert_eq!(state.current_index(), Some(0));
}

#[test]
fn successful_moves_queue_events() {
    let mut state = loaded_state(false);

    assert!(state.move_to_next());
    assert!(state.move_to_next());
    assert!(!state.move_to_next());
    assert!(state.move_to_previous());
    assert!(state.move_to_first());
    assert!(state.move_to_last());
    assert!(state.move_to_position(1));
    assert!(!state.move_to_position(3));

    assert_eq!(
        navigated_indices(&state.drain_events()),
        vec![1, 2, 1, 0, 2, 1]
    );
    assert_eq!(state.current_index(), Some(1));
}

#[test]
fn navigation_without_path_is_a_noop() {
    let mut state = NavigationState::default();

    assert!(!state.move_to_next());
    assert!(!state.move_to_previous());
    assert!(!state.move_to_first());
    assert!(!state.move_to_last());
    assert!(!state.move_to_position(0));
    assert!(!state.start_autoplay(Duration::from_millis(100)));
    assert!(!state.autoplay_tick());
    state.reset();

    assert_eq!(state.current_index(), None);
    assert!(state.is_at_start());
    assert!(state.is_at_end());
    assert_relative_eq!(state.progress_percentage(), 0.0);
    assert!(state.drain_events().is_empty());
}

#[test]
fn autoplay_without_loop_stops_at_the_end() {
    let mut state = loaded_state(false);
    assert!(state.start_autoplay(Duration::from_millis(100)));

    assert!(state.autoplay_tick());
    assert!(state.autoplay_tick());
    assert_eq!(state.current_index(), Some(2));
    assert!(state.is_at_end());
    assert!(state.is_playing());

    assert!(!state.autoplay_tick());
    assert_eq!(state.current_index(), Some(2));
    assert_eq!(state.playback_state(), PlaybackState::Idle);

    let events = state.drain_events();
    assert_eq!(navigated_indices(&events), vec![1, 2]);
    assert_eq!(events.last(), Some(&NavigationEvent::PlaybackEnded));
}

#[test]
fn autoplay_with_loop_wraps_to_start() {
    let mut state = loaded_state(true);
    assert!(state.start_autoplay(Duration::from_millis(100)));

    state.autoplay_tick();
    state.autoplay_tick();
    assert!(state.autoplay_tick());

    assert_eq!(state.current_index(), Some(0));
    assert!(state.is_playing());
    assert!(state.autoplay_tick());
    assert_eq!(state.current_index(), Some(1));

    let events = state.drain_events();
    assert_eq!(navigated_indices(&events), vec![1, 2, 0, 1]);
    assert!(!events.contains(&NavigationEvent::PlaybackEnded));
}

#[test]
fn playback_state_machine() {
    let mut state = loaded_state(false);
    assert_eq!(state.playback_state(), PlaybackState::Idle);

    assert!(!state.pause_autoplay());
    assert!(!state.resume_autoplay());

    assert!(state.start_autoplay(Duration::from_millis(250)));
    assert!(!state.start_autoplay(Duration::from_millis(100)));
    assert_eq!(state.play_interval(), Duration::from_millis(250));

    assert!(state.pause_autoplay());
    assert!(state.is_paused());
    assert!(!state.autoplay_tick());
    assert_eq!(state.current_index(), Some(0));

    assert!(state.resume_autoplay());
    assert!(state.is_playing());

    state.stop_autoplay();
    assert_eq!(state.playback_state(), PlaybackState::Idle);

    assert!(state.start_autoplay(Duration::from_millis(100)));
    state.pause_autoplay();
    assert!(state.start_autoplay(Duration::from_millis(100)));
    assert!(state.is_playing());
}

#[test]
fn toggle_cycles_play_pause_resume() {
    let mut state = loaded_state(false);

    state.toggle_autoplay();
    assert_eq!(state.playback_state(), PlaybackState::Playing);
    state.toggle_autoplay();
    assert_eq!(state.playback_state(), PlaybackState::Paused);
    state.toggle_autoplay();
    assert_eq!(state.playback_state(), PlaybackState::Playing);
}

#[test]
fn reset_stops_and_rewinds() {
    let mut state = loaded_state(false);
    state.start_autoplay(Duration::from_millis(100));
    state.move_to_last();

    state.reset();

    assert_eq!(state.playback_state(), PlaybackState::Idle);
    assert_eq!(state.current_index(), Some(0));
}

#[test]
fn progress_counts_the_current_waypoint() {
    let mut state = loaded_state(false);

    assert_relative_eq!(state.progress_percentage(), 100.0 / 3.0, epsilon = 1e-4);
    state.move_to_last();
    assert_relative_eq!(state.progress_percentage(), 100.0);
}

#[test]
fn play_speed_scales_the_tick_interval() {
    let mut state = loaded_state(false);

    state.set_play_speed(2.0).unwrap();
    assert_relative_eq!(state.tick_interval().as_secs_f64(), 0.05, epsilon = 1e-6);

    assert_eq!(state.set_play_speed(0.0), Err(PlaybackError::InvalidPlaySpeed(0.0)));
    assert!(state.set_play_speed(f32::NAN).is_err());
    assert!(state.set_play_speed(-1.0).is_err());
    assert_relative_eq!(state.play_speed(), 2.0);
}

#[test]
fn tiny_play_speed_saturates_the_tick_interval() {
    let mut state = loaded_state(false);

    state.set_play_speed(1e-30).unwrap();
    assert_eq!(state.tick_interval(), Duration::MAX);

    state.set_play_speed(f32::MIN_POSITIVE).unwrap();
    assert_eq!(state.tick_interval(), Duration::MAX);
}

#[test]
fn longest_interval_at_half_speed_saturates() {
    let mut state = loaded_state(false);

    state.set_play_interval(Duration::MAX).unwrap();
    state.set_play_speed(0.5).unwrap();

    assert_eq!(state.tick_interval(), Duration::MAX);
}

#[test]
fn zero_interval_is_rejected() {
    let mut state = loaded_state(false);

    assert_eq!(
        state.set_play_interval(Duration::ZERO),
        Err(PlaybackError::InvalidInterval(Duration::ZERO))
    );
    assert_eq!(state.play_interval(), Duration::from_millis(100));
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let state = NavigationState::new(PlaybackConfig {
        play_speed: -3.0,
        interval: Duration::ZERO,
        ..PlaybackConfig::default()
    });

    assert_relative_eq!(state.play_speed(), 1.0);
    assert_eq!(state.play_interval(), Duration::from_millis(100));
}

#[test]
fn speed_steps_stay_within_bounds() {
    let mut state = loaded_state(false);

    assert_eq!(state.speed_up(), Duration::from_millis(80));
    for _ in 0..10 {
        state.speed_up();
    }
    assert_eq!(state.play_interval(), Duration::from_millis(20));

    for _ in 0..100 {
        state.slow_down();
    }
    assert_eq!(state.play_interval(), Duration::from_millis(1000));
    assert_eq!(state.slow_down(), Duration::from_millis(1000));
}

#[test]
fn clear_path_stops_and_empties() {
    let mut state = loaded_state(true);
    state.start_autoplay(Duration::from_millis(100));

    state.clear_path();

    assert_eq!(state.total_nodes(), 0);
    assert_eq!(state.current_index(), None);
    assert!(!state.is_playing());
}
