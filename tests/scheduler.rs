mod support;

mod tests {
    use embassy_time::{Duration, Instant};
    use matrix_composer::animation::{AUTO_SEQUENCE, AnimationMode, DIM_RED};
    use matrix_composer::color::Rgb;
    use matrix_composer::control::{ControlChannel, ControlError, ControlIntent, ControlSender};
    use matrix_composer::{EngineConfig, Housekeeping, Scheduler, Speed, map_to_index};

    use crate::support::{
        Duty, ManualClock, RecordingDuties, RecordingSink, ScriptedSensor, SteppingClock, is_blank,
        lit_count, reading,
    };

    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    type TestScheduler<'a> =
        Scheduler<'a, &'a ManualClock, RecordingSink, ScriptedSensor, RecordingDuties, 8>;

    fn build<'a>(
        clock: &'a ManualClock,
        channel: &'a ControlChannel<8>,
        mode: AnimationMode,
    ) -> TestScheduler<'a> {
        Scheduler::new(
            clock,
            RecordingSink::new(),
            ScriptedSensor::always(reading(21.5)),
            RecordingDuties::default(),
            channel.receiver(),
            &EngineConfig {
                mode,
                ..EngineConfig::default()
            },
        )
    }

    fn poll_at(scheduler: &mut TestScheduler<'_>, clock: &ManualClock, millis: u64) {
        clock.set(millis);
        scheduler.poll();
    }

    #[test]
    fn test_first_pass_blanks_then_paints() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Red);

        let result = scheduler.poll();
        assert_eq!(result.mode, Some(AnimationMode::Red));

        let frames = &scheduler.sink().frames;
        assert_eq!(frames.len(), 2);
        assert!(is_blank(&frames[0]));
        assert!(frames[1].iter().all(|pixel| *pixel == DIM_RED));
    }

    #[test]
    fn test_every_switch_starts_from_blank_frame() {
        for from in AnimationMode::ALL {
            for to in AnimationMode::ALL {
                let clock = ManualClock::new(0);
                let channel = ControlChannel::new();
                let mut scheduler = build(&clock, &channel, from);

                poll_at(&mut scheduler, &clock, 0);
                poll_at(&mut scheduler, &clock, 100);

                let before = scheduler.sink().frames.len();
                scheduler.set_mode(to);
                poll_at(&mut scheduler, &clock, 200);

                let frames = &scheduler.sink().frames;
                assert!(frames.len() > before, "{from:?} -> {to:?} sent nothing");
                assert!(is_blank(&frames[before]), "{from:?} -> {to:?} not blanked");
            }
        }
    }

    #[test]
    fn test_reselecting_mode_restarts_it() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Red);

        poll_at(&mut scheduler, &clock, 0);
        poll_at(&mut scheduler, &clock, 10);
        assert_eq!(scheduler.sink().frames.len(), 2);

        scheduler.set_mode(AnimationMode::Red);
        poll_at(&mut scheduler, &clock, 20);

        let frames = &scheduler.sink().frames;
        assert_eq!(frames.len(), 4);
        assert!(is_blank(&frames[2]));
        assert!(frames[3].iter().all(|pixel| *pixel == DIM_RED));
    }

    #[test]
    fn test_auto_cycles_through_sequence() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Auto);

        poll_at(&mut scheduler, &clock, 0);
        assert_eq!(scheduler.active_mode(), Some(AUTO_SEQUENCE[0]));

        poll_at(&mut scheduler, &clock, 9_990);
        assert_eq!(scheduler.active_mode(), Some(AUTO_SEQUENCE[0]));

        for (step, expected) in AUTO_SEQUENCE.iter().enumerate().skip(1) {
            let before = scheduler.sink().frames.len();
            poll_at(&mut scheduler, &clock, step as u64 * 10_000);
            assert_eq!(scheduler.active_mode(), Some(*expected));
            assert!(is_blank(&scheduler.sink().frames[before]));
        }

        poll_at(&mut scheduler, &clock, 60_000);
        assert_eq!(scheduler.active_mode(), Some(AUTO_SEQUENCE[0]));
        assert_eq!(scheduler.mode(), AnimationMode::Auto);
    }

    #[test]
    fn test_leaving_auto_stops_cycling() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Auto);

        poll_at(&mut scheduler, &clock, 0);
        scheduler.set_mode(AnimationMode::Lines);
        poll_at(&mut scheduler, &clock, 5_000);
        poll_at(&mut scheduler, &clock, 30_000);

        assert_eq!(scheduler.active_mode(), Some(AnimationMode::Lines));
    }

    #[test]
    fn test_draw_mode_shows_grid() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Draw);

        scheduler.set_color(BLUE);
        assert!(scheduler.set_drawing_pixel(3, 2, true));
        poll_at(&mut scheduler, &clock, 0);

        let frame = *scheduler.sink().last_frame().unwrap();
        assert_eq!(frame[map_to_index(3, 2)], BLUE);
        assert_eq!(lit_count(&frame), 1);

        scheduler.clear_drawing_grid();
        poll_at(&mut scheduler, &clock, 10);
        assert!(scheduler.sink().last_frame().is_some_and(is_blank));
    }

    #[test]
    fn test_drawing_grid_survives_mode_changes() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Draw);

        scheduler.draw_border(BLUE);
        poll_at(&mut scheduler, &clock, 0);
        scheduler.set_mode(AnimationMode::Fire);
        poll_at(&mut scheduler, &clock, 100);
        scheduler.set_mode(AnimationMode::Draw);
        poll_at(&mut scheduler, &clock, 200);

        let frame = *scheduler.sink().last_frame().unwrap();
        // 32 + 32 + 5 + 5 edge cells
        assert_eq!(lit_count(&frame), 74);
        assert_eq!(frame[map_to_index(0, 0)], BLUE);
        assert_eq!(frame[map_to_index(31, 6)], BLUE);
    }

    #[test]
    fn test_rejects_out_of_range_pixel() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Draw);

        assert!(!scheduler.set_drawing_pixel(32, 0, true));
        assert!(!scheduler.set_drawing_pixel(0, -1, true));
        assert!(scheduler.set_drawing_pixel(31, 6, true));
    }

    #[test]
    fn test_housekeeping_order_and_watchdog_rate() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Red);

        poll_at(&mut scheduler, &clock, 0);
        assert_eq!(
            scheduler.housekeeper().duties().calls,
            [Duty::Watchdog, Duty::Network, Duty::Updates]
        );

        for millis in (10..1_000).step_by(10) {
            poll_at(&mut scheduler, &clock, millis);
        }
        let duties = scheduler.housekeeper().duties();
        assert_eq!(duties.count(Duty::Watchdog), 1);
        assert_eq!(duties.count(Duty::Network), 100);
        assert_eq!(duties.count(Duty::Updates), 100);

        poll_at(&mut scheduler, &clock, 1_000);
        assert_eq!(scheduler.housekeeper().duties().count(Duty::Watchdog), 2);
    }

    #[test]
    fn test_intents_are_applied_on_next_pass() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let sender = channel.sender();
        let mut scheduler = build(&clock, &channel, AnimationMode::Lines);
        poll_at(&mut scheduler, &clock, 0);

        sender.send(ControlIntent::SetMode(AnimationMode::Red)).ok();
        sender.send(ControlIntent::SetSpeed(9.0)).ok();
        sender.send(ControlIntent::SetColor(BLUE)).ok();
        sender
            .send(ControlIntent::SetPixel {
                col: 1,
                row: 1,
                on: true,
            })
            .ok();
        assert!(channel.receiver().cancel_signal().is_raised());
        assert_eq!(scheduler.active_mode(), Some(AnimationMode::Lines));

        poll_at(&mut scheduler, &clock, 10);
        assert_eq!(scheduler.active_mode(), Some(AnimationMode::Red));
        assert_eq!(scheduler.speed(), Speed::new(Speed::MAX));
        assert_eq!(scheduler.color(), BLUE);
        assert_eq!(scheduler.controls().grid().get(1, 1), Some(BLUE));
        assert!(!channel.receiver().cancel_signal().is_raised());
    }

    #[test]
    fn test_full_channel_rejects_intent() {
        let channel = ControlChannel::<8>::new();
        let sender = channel.sender();

        for _ in 0..8 {
            assert_eq!(sender.send(ControlIntent::ClearGrid), Ok(()));
        }
        assert_eq!(
            sender.send(ControlIntent::ClearGrid),
            Err(ControlError::ChannelFull)
        );
    }

    #[test]
    fn test_pass_timing_corrects_drift() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Red);

        let first = scheduler.poll();
        assert_eq!(first.sleep_duration, Duration::from_millis(10));
        assert_eq!(first.next_deadline, Instant::from_millis(10));

        clock.set(10);
        let second = scheduler.poll();
        assert_eq!(second.sleep_duration, Duration::from_millis(10));

        // Stalled far behind: schedule from now instead of catching up
        clock.set(500);
        let stalled = scheduler.poll();
        assert_eq!(stalled.next_deadline, Instant::from_millis(510));

        clock.set(515);
        let late = scheduler.poll();
        assert_eq!(late.next_deadline, Instant::from_millis(520));
        assert_eq!(late.sleep_duration, Duration::from_millis(5));
    }

    #[test]
    fn test_overdue_pass_sleeps_zero() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Red);

        scheduler.poll();
        clock.set(25);
        let result = scheduler.poll();
        assert_eq!(result.next_deadline, Instant::from_millis(20));
        assert_eq!(result.sleep_duration, Duration::from_millis(0));
    }

    #[test]
    fn test_temperature_telemetry() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Temperature);

        assert_eq!(scheduler.last_temperature(), None);
        assert_eq!(scheduler.last_humidity(), None);

        poll_at(&mut scheduler, &clock, 0);
        assert_eq!(scheduler.last_temperature(), Some(21.5));
        assert_eq!(scheduler.last_humidity(), Some(40.0));
    }

    #[test]
    fn test_mode_reporting() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Nebula);

        assert_eq!(scheduler.mode_index(), 4);
        assert_eq!(scheduler.mode_name(), "Nebula Swirl");
        assert_eq!(scheduler.active_mode(), None);

        poll_at(&mut scheduler, &clock, 0);
        assert_eq!(scheduler.active_mode(), Some(AnimationMode::Nebula));
    }

    #[test]
    fn test_set_speed_clamps() {
        let clock = ManualClock::new(0);
        let channel = ControlChannel::new();
        let mut scheduler = build(&clock, &channel, AnimationMode::Red);

        scheduler.set_speed(0.0);
        assert_eq!(scheduler.speed().value(), Speed::MIN);
        scheduler.set_speed(1.5);
        assert_eq!(scheduler.speed().value(), 1.5);
    }

    /// Duties that ask for the red mode from inside the `switch_on`-th network service
    struct SwitchingDuties<'a> {
        sender: ControlSender<'a, 8>,
        network: usize,
        switch_on: usize,
    }

    impl Housekeeping for SwitchingDuties<'_> {
        fn service_network(&mut self) {
            self.network += 1;
            if self.network == self.switch_on {
                self.sender
                    .send(ControlIntent::SetMode(AnimationMode::Red))
                    .expect("queue has room");
            }
        }

        fn service_updates(&mut self) {}

        fn feed_watchdog(&mut self) {}
    }

    fn build_switching<'a>(
        clock: SteppingClock,
        channel: &'a ControlChannel<8>,
        switch_on: usize,
    ) -> Scheduler<'a, SteppingClock, RecordingSink, ScriptedSensor, SwitchingDuties<'a>, 8> {
        Scheduler::new(
            clock,
            RecordingSink::new(),
            ScriptedSensor::always(reading(21.5)),
            SwitchingDuties {
                sender: channel.sender(),
                network: 0,
                switch_on,
            },
            channel.receiver(),
            &EngineConfig {
                mode: AnimationMode::Nebula,
                ..EngineConfig::default()
            },
        )
    }

    #[test]
    fn test_slow_tick_services_housekeeping_between_columns() {
        let channel = ControlChannel::new();
        // Every read of the clock is past the nebula grain
        let mut scheduler = build_switching(SteppingClock::new(700), &channel, 0);

        scheduler.poll();
        let network = scheduler.housekeeper().duties().network;
        assert!(network > 1, "only {network} network services in the pass");

        let frames = &scheduler.sink().frames;
        assert_eq!(frames.len(), 2);
        assert!(is_blank(&frames[0]));
        assert!(lit_count(&frames[1]) > 0);
    }

    #[test]
    fn test_mode_request_during_tick_cancels_frame() {
        let channel = ControlChannel::new();
        let mut scheduler = build_switching(SteppingClock::new(700), &channel, 3);

        scheduler.poll();
        assert!(scheduler.housekeeper().duties().network >= 3);
        assert_eq!(scheduler.active_mode(), Some(AnimationMode::Nebula));
        // Only the blank activation frame; the nebula frame was abandoned
        assert_eq!(scheduler.sink().frames.len(), 1);

        scheduler.poll();
        assert_eq!(scheduler.active_mode(), Some(AnimationMode::Red));
        let frame = scheduler.sink().last_frame().unwrap();
        assert!(frame.iter().all(|pixel| *pixel == DIM_RED));
    }
}
