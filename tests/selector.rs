mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_status_ring::{AnimationSelector, Scene, Selection, Signals, TrackId};

    const TRACK_A: TrackId = TrackId(1);
    const TRACK_B: TrackId = TrackId(2);

    fn playing(track: Option<TrackId>, volume: Option<u8>) -> Signals {
        Signals {
            connected: true,
            playing: true,
            track,
            volume,
            ..Signals::default()
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    /// Selector that has already played the connected chime
    fn connected_selector() -> AnimationSelector {
        let mut selector = AnimationSelector::new(Duration::from_secs(3));
        assert_eq!(
            selector.select(&playing(None, None), at(0)),
            Selection::Play(Scene::Connected)
        );
        selector
    }

    #[test]
    fn test_kill_outranks_everything() {
        let mut selector = AnimationSelector::default();
        let signals = Signals {
            kill_requested: true,
            shutdown_requested: true,
            ..playing(Some(TRACK_A), Some(10))
        };
        assert_eq!(selector.select(&signals, at(0)), Selection::Kill);
    }

    #[test]
    fn test_shutdown_outranks_waiting() {
        let mut selector = AnimationSelector::default();
        let signals = Signals {
            shutdown_requested: true,
            ..Signals::default()
        };
        assert_eq!(
            selector.select(&signals, at(0)),
            Selection::Play(Scene::Shutdown)
        );
    }

    #[test]
    fn test_waiting_then_connected_once() {
        let mut selector = AnimationSelector::default();
        for tick in 0..10 {
            let signals = Signals {
                button_pressed: tick % 2 == 0,
                volume: Some(tick),
                ..Signals::default()
            };
            assert_eq!(
                selector.select(&signals, at(u64::from(tick) * 16)),
                Selection::Play(Scene::Waiting)
            );
        }
        assert!(!selector.had_connection());

        assert_eq!(
            selector.select(&playing(Some(TRACK_A), Some(20)), at(200)),
            Selection::Play(Scene::Connected)
        );
        assert!(selector.had_connection());
        assert_eq!(
            selector.select(&playing(Some(TRACK_A), Some(20)), at(216)),
            Selection::Play(Scene::NowPlaying)
        );
    }

    #[test]
    fn test_reconnect_plays_connected_again() {
        let mut selector = connected_selector();
        assert_eq!(
            selector.select(&Signals::default(), at(16)),
            Selection::Play(Scene::Waiting)
        );
        assert!(!selector.had_connection());
        assert_eq!(
            selector.select(&playing(None, None), at(32)),
            Selection::Play(Scene::Connected)
        );
    }

    #[test]
    fn test_track_edges() {
        let mut selector = connected_selector();
        let tracks = [TRACK_A, TRACK_A, TRACK_B, TRACK_B, TRACK_A];
        let selections: Vec<Selection> = tracks
            .iter()
            .enumerate()
            .map(|(tick, track)| {
                let selection = selector.select(&playing(Some(*track), None), at(16 * (tick as u64 + 1)));
                if selection == Selection::Play(Scene::TrackChanged) {
                    selector.acknowledge_track_change();
                }
                selection
            })
            .collect();

        assert_eq!(
            selections,
            [
                Selection::Play(Scene::NowPlaying),
                Selection::Play(Scene::NowPlaying),
                Selection::Play(Scene::TrackChanged),
                Selection::Play(Scene::NowPlaying),
                Selection::Play(Scene::TrackChanged),
            ]
        );
    }

    #[test]
    fn test_same_track_after_reconnect_is_not_a_change() {
        let mut selector = connected_selector();
        selector.select(&playing(Some(TRACK_A), None), at(16));
        selector.select(&Signals::default(), at(32));
        assert_eq!(
            selector.select(&playing(Some(TRACK_A), None), at(48)),
            Selection::Play(Scene::Connected)
        );
        assert_eq!(
            selector.select(&playing(Some(TRACK_A), None), at(64)),
            Selection::Play(Scene::NowPlaying)
        );
    }

    #[test]
    fn test_first_volume_is_not_a_change() {
        let mut selector = connected_selector();
        assert_eq!(
            selector.select(&playing(None, Some(40)), at(16)),
            Selection::Play(Scene::NowPlaying)
        );
        assert!(!selector.is_showing_volume(at(16)));
    }

    #[test]
    fn test_volume_window() {
        let mut selector = connected_selector();
        selector.select(&playing(None, Some(40)), at(16));

        assert_eq!(
            selector.select(&playing(None, Some(45)), at(1000)),
            Selection::Play(Scene::VolumeMeter)
        );
        let pressed = Signals {
            button_pressed: true,
            ..playing(None, Some(45))
        };
        assert_eq!(
            selector.select(&pressed, at(3999)),
            Selection::Play(Scene::VolumeMeter)
        );
        assert_eq!(
            selector.select(&playing(None, Some(45)), at(4000)),
            Selection::Play(Scene::NowPlaying)
        );
    }

    #[test]
    fn test_volume_change_extends_window() {
        let mut selector = connected_selector();
        selector.select(&playing(None, Some(40)), at(16));
        selector.select(&playing(None, Some(45)), at(1000));
        selector.select(&playing(None, Some(50)), at(3000));
        assert_eq!(
            selector.select(&playing(None, Some(50)), at(5999)),
            Selection::Play(Scene::VolumeMeter)
        );
        assert_eq!(
            selector.select(&playing(None, Some(50)), at(6000)),
            Selection::Play(Scene::NowPlaying)
        );
    }

    #[test]
    fn test_button_outranks_input_error() {
        let mut selector = connected_selector();
        let stopped = Signals {
            playing: false,
            ..playing(Some(TRACK_A), None)
        };
        assert_eq!(
            selector.select(&stopped, at(16)),
            Selection::Play(Scene::InputError)
        );

        let pressed = Signals {
            button_pressed: true,
            ..stopped
        };
        assert_eq!(
            selector.select(&pressed, at(32)),
            Selection::Play(Scene::AwaitingScan)
        );
    }

    #[test]
    fn test_input_error_outranks_track_change() {
        let mut selector = connected_selector();
        selector.select(&playing(Some(TRACK_A), None), at(16));
        let stopped = Signals {
            playing: false,
            ..playing(Some(TRACK_B), None)
        };
        assert_eq!(
            selector.select(&stopped, at(32)),
            Selection::Play(Scene::InputError)
        );
    }

    #[test]
    fn test_track_change_repeats_until_acknowledged() {
        let mut selector = connected_selector();
        selector.select(&playing(Some(TRACK_A), None), at(16));

        for tick in 2..6 {
            assert_eq!(
                selector.select(&playing(Some(TRACK_B), None), at(16 * tick)),
                Selection::Play(Scene::TrackChanged)
            );
        }
        assert!(selector.track_change_pending());

        selector.acknowledge_track_change();
        assert_eq!(
            selector.select(&playing(Some(TRACK_B), None), at(96)),
            Selection::Play(Scene::NowPlaying)
        );
    }

    #[test]
    fn test_track_change_waits_behind_volume_meter() {
        let mut selector = connected_selector();
        selector.select(&playing(Some(TRACK_A), Some(40)), at(16));
        assert_eq!(
            selector.select(&playing(Some(TRACK_B), Some(45)), at(32)),
            Selection::Play(Scene::VolumeMeter)
        );
        assert_eq!(
            selector.select(&playing(Some(TRACK_B), Some(45)), at(3032)),
            Selection::Play(Scene::TrackChanged)
        );
    }

    #[test]
    fn test_disconnect_drops_pending_track_change() {
        let mut selector = connected_selector();
        selector.select(&playing(Some(TRACK_A), None), at(16));
        selector.select(&playing(Some(TRACK_B), None), at(32));
        assert!(selector.track_change_pending());

        selector.select(&Signals::default(), at(48));
        assert!(!selector.track_change_pending());
    }
}
