mod tests {
    use embassy_time::Duration;
    use myrtio_status_ring::animation::{Repeat, Timeline};

    const TICK: Duration = Duration::from_millis(10);

    #[test]
    fn test_once_finishes_strictly_after_duration() {
        let mut timeline = Timeline::once(Duration::from_millis(100));
        assert!(!timeline.is_finished());

        timeline.advance(Duration::from_millis(100));
        assert_eq!(timeline.alpha(), 255);
        assert!(!timeline.is_finished());

        timeline.advance(Duration::from_millis(1));
        assert!(timeline.is_finished());
    }

    #[test]
    fn test_once_progress() {
        let mut timeline = Timeline::once(Duration::from_millis(100));
        assert_eq!(timeline.alpha(), 0);
        timeline.advance(Duration::from_millis(50));
        assert_eq!(timeline.alpha(), 127);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut timeline = Timeline::once(Duration::from_millis(0));
        assert_eq!(timeline.alpha(), 255);
        timeline.advance(TICK);
        assert!(timeline.is_finished());
    }

    #[test]
    fn test_unbounded_never_finishes() {
        let mut timeline = Timeline::unbounded();
        for _ in 0..1000 {
            timeline.advance(TICK);
        }
        assert!(!timeline.is_finished());
        assert_eq!(timeline.alpha(), 0);
        assert_eq!(timeline.duration(), None);
    }

    #[test]
    fn test_loop_restarts() {
        let mut timeline = Timeline::looping(Duration::from_millis(100));
        assert_eq!(timeline.repeat(), Repeat::Loop);

        timeline.advance(Duration::from_millis(60));
        assert_eq!(timeline.alpha(), 153);

        timeline.advance(Duration::from_millis(60));
        assert_eq!(timeline.elapsed(), Duration::from_millis(0));
        assert_eq!(timeline.alpha(), 0);
        assert!(!timeline.is_finished());
    }

    #[test]
    fn test_loop_never_finishes() {
        let mut timeline = Timeline::looping(Duration::from_millis(100));
        for _ in 0..500 {
            timeline.advance(TICK);
            assert!(!timeline.is_finished());
        }
    }

    #[test]
    fn test_ping_pong_flips_direction() {
        let mut timeline = Timeline::ping_pong(Duration::from_millis(100));

        timeline.advance(Duration::from_millis(50));
        assert!(timeline.is_forward());
        assert_eq!(timeline.alpha(), 127);

        timeline.advance(Duration::from_millis(60));
        assert!(!timeline.is_forward());
        assert_eq!(timeline.alpha(), 255);

        timeline.advance(Duration::from_millis(50));
        assert_eq!(timeline.alpha(), 128);

        timeline.advance(Duration::from_millis(60));
        assert!(timeline.is_forward());
        assert_eq!(timeline.alpha(), 0);
        assert!(!timeline.is_finished());
    }

    #[test]
    fn test_ping_pong_flips_once_per_half_cycle() {
        let mut timeline = Timeline::ping_pong(Duration::from_millis(100));
        let mut flips = 0;
        let mut forward = timeline.is_forward();
        // The run is over once elapsed exceeds 100 ms, so a half cycle takes 11 ticks
        for _ in 0..110 {
            timeline.advance(TICK);
            if timeline.is_forward() != forward {
                forward = timeline.is_forward();
                flips += 1;
            }
        }
        assert_eq!(flips, 10);
    }

    #[test]
    fn test_reset() {
        let mut timeline = Timeline::ping_pong(Duration::from_millis(100)).with_wait_for_finish();
        timeline.advance(Duration::from_millis(150));
        timeline.advance(Duration::from_millis(30));
        assert!(!timeline.is_forward());

        timeline.reset();
        assert!(timeline.is_forward());
        assert_eq!(timeline.elapsed(), Duration::from_millis(0));
        assert!(timeline.waits_for_finish());
    }
}
