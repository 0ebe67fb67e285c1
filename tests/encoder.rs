mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_status_ring::{
        EncoderConfig, EncoderEvent, InputSignals, PlayerError, RotaryEncoder, VolumeControl,
    };

    struct MockVolume {
        volume: u8,
        reachable: bool,
        writes: usize,
    }

    impl MockVolume {
        fn new(volume: u8) -> Self {
            Self {
                volume,
                reachable: true,
                writes: 0,
            }
        }
    }

    impl VolumeControl for MockVolume {
        fn volume(&mut self) -> Result<u8, PlayerError> {
            if self.reachable {
                Ok(self.volume)
            } else {
                Err(PlayerError::Disconnected)
            }
        }

        fn set_volume(&mut self, volume: u8) -> Result<(), PlayerError> {
            self.writes += 1;
            self.volume = volume;
            Ok(())
        }
    }

    /// Player whose volume query triggers another encoder edge
    struct ReentrantPlayer<'a> {
        encoder: &'a RotaryEncoder,
        signals: &'a InputSignals,
        volume: u8,
        nested: Option<EncoderEvent>,
    }

    impl VolumeControl for ReentrantPlayer<'_> {
        fn volume(&mut self) -> Result<u8, PlayerError> {
            let mut inner = MockVolume::new(0);
            self.nested = Some(self.encoder.on_edge(
                false,
                true,
                Instant::from_millis(0),
                &mut inner,
                self.signals,
            ));
            Ok(self.volume)
        }

        fn set_volume(&mut self, volume: u8) -> Result<(), PlayerError> {
            self.volume = volume;
            Ok(())
        }
    }

    fn config(step: u8) -> EncoderConfig {
        EncoderConfig {
            step,
            ..EncoderConfig::new()
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_increase_applies_half_step() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(50);

        let event = encoder.on_edge(true, false, at(0), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Adjusted(55));
        assert_eq!(player.volume, 55);
        assert_eq!(encoder.counter(), 1);
    }

    #[test]
    fn test_decrease() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(50);

        let event = encoder.on_edge(true, true, at(0), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Adjusted(45));
        assert_eq!(encoder.counter(), -1);
    }

    #[test]
    fn test_small_step_still_moves() {
        let encoder = RotaryEncoder::new(config(1), false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(50);

        let event = encoder.on_edge(true, false, at(0), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Adjusted(51));
    }

    #[test]
    fn test_unchanged_clock_is_ignored() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(50);

        let event = encoder.on_edge(false, true, at(0), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Unchanged);
        assert_eq!(player.writes, 0);
    }

    #[test]
    fn test_both_edges_of_a_detent() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(50);

        encoder.on_edge(true, false, at(0), &mut player, &signals);
        encoder.on_edge(false, true, at(5), &mut player, &signals);
        assert_eq!(player.volume, 60);
        assert_eq!(encoder.counter(), 2);
    }

    #[test]
    fn test_clamps_to_limits() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();

        let mut loud = MockVolume::new(98);
        assert_eq!(
            encoder.on_edge(true, false, at(0), &mut loud, &signals),
            EncoderEvent::Adjusted(100)
        );

        let encoder = RotaryEncoder::new(config(10), false);
        let mut quiet = MockVolume::new(2);
        assert_eq!(
            encoder.on_edge(true, true, at(0), &mut quiet, &signals),
            EncoderEvent::Adjusted(0)
        );
    }

    #[test]
    fn test_direction_reversal_is_suppressed() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(50);

        encoder.on_edge(true, false, at(0), &mut player, &signals);
        let event = encoder.on_edge(false, false, at(50), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Suppressed);
        assert_eq!(player.volume, 55);
        assert_eq!(encoder.counter(), 0);

        let event = encoder.on_edge(true, true, at(200), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Adjusted(50));
    }

    #[test]
    fn test_reentrant_edge_is_dropped() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();
        let mut player = ReentrantPlayer {
            encoder: &encoder,
            signals: &signals,
            volume: 50,
            nested: None,
        };

        let event = encoder.on_edge(true, false, at(0), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Adjusted(55));
        assert_eq!(player.nested, Some(EncoderEvent::Dropped));
        assert_eq!(encoder.counter(), 1);

        // The guard is released once the adjustment is done
        let mut plain = MockVolume::new(55);
        let event = encoder.on_edge(false, true, at(10), &mut plain, &signals);
        assert_eq!(event, EncoderEvent::Adjusted(60));
    }

    #[test]
    fn test_adjustment_is_reported() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(50);

        encoder.on_edge(true, false, at(0), &mut player, &signals);
        assert_eq!(signals.snapshot().reported_volume, Some(55));
        assert_eq!(signals.snapshot().reported_volume, None);
    }

    #[test]
    fn test_unreachable_player() {
        let encoder = RotaryEncoder::new(config(10), false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(50);
        player.reachable = false;

        let event = encoder.on_edge(true, false, at(0), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Failed(PlayerError::Disconnected));
        assert_eq!(signals.snapshot().reported_volume, None);
    }

    #[test]
    fn test_apply_settings() {
        let mut config = EncoderConfig::new();
        let applied = config.apply_settings(
            "AUDIOVOLMINLIMIT=\"10\"\nAUDIOVOLMAXLIMIT=\"70\"\nAUDIOVOLCHANGESTEP=\"4\"\n# comment\n",
        );
        assert_eq!(applied, 2);
        assert_eq!(config.min_volume, 0);
        assert_eq!(config.max_volume, 70);
        assert_eq!(config.step, 4);
        assert_eq!(config.direction_lockout, Duration::from_millis(100));
    }

    #[test]
    fn test_apply_settings_caps_max_volume() {
        let mut config = EncoderConfig::new();
        config.apply_settings("AUDIOVOLMAXLIMIT=150\nAUDIOVOLCHANGESTEP=bogus");
        assert_eq!(config.max_volume, 100);
        assert_eq!(config.step, 3);
    }

    #[test]
    fn test_max_volume_limit_applies() {
        let mut config = EncoderConfig::new();
        config.apply_settings("AUDIOVOLMAXLIMIT=\"60\"");
        let encoder = RotaryEncoder::new(config, false);
        let signals = InputSignals::new();
        let mut player = MockVolume::new(60);

        let event = encoder.on_edge(true, false, at(0), &mut player, &signals);
        assert_eq!(event, EncoderEvent::Adjusted(60));
    }
}
