mod support;

mod tests {
    use matrix_composer::animation::{TemperatureAnimation, wave_row};
    use matrix_composer::color::Rgb;
    use matrix_composer::{SensorError, map_to_index};

    use crate::support::{Bench, ScriptedSensor, reading};

    const WAVE: Rgb = Rgb { r: 255, g: 0, b: 0 };

    #[test]
    fn test_redraws_only_beyond_epsilon() {
        let sensor = ScriptedSensor::new([reading(23.5), reading(23.55), reading(24.0)]);
        let mut bench = Bench::with_sensor(sensor);
        let mut temperature = TemperatureAnimation::new();

        bench.tick(&mut temperature, 0);
        assert_eq!(bench.sink.flush_count(), 1);
        assert_eq!(temperature.shown(), Some(23.5));

        bench.tick(&mut temperature, 1_000);
        assert_eq!(bench.sink.flush_count(), 1);
        assert_eq!(temperature.shown(), Some(23.5));
        assert_eq!(bench.controls.telemetry().temperature(), Some(23.55));

        bench.tick(&mut temperature, 2_000);
        assert_eq!(bench.sink.flush_count(), 2);
        assert_eq!(temperature.shown(), Some(24.0));
    }

    #[test]
    fn test_sensor_is_sampled_once_per_period() {
        let mut bench = Bench::with_sensor(ScriptedSensor::always(reading(20.0)));
        let mut temperature = TemperatureAnimation::new();

        for millis in (0..3_000).step_by(10) {
            bench.tick(&mut temperature, millis);
        }
        assert_eq!(bench.sensor.reads, 3);
    }

    #[test]
    fn test_failure_shows_moving_wave() {
        let sensor = ScriptedSensor::new([reading(21.0), Err(SensorError::ReadFailed)]);
        let mut bench = Bench::with_sensor(sensor);
        let mut temperature = TemperatureAnimation::new();

        bench.tick(&mut temperature, 0);
        assert!(!temperature.is_failing());

        bench.tick(&mut temperature, 1_000);
        assert!(temperature.is_failing());
        assert_eq!(temperature.shown(), None);
        assert_eq!(bench.sink.flush_count(), 2);
        for x in 0..32 {
            assert_eq!(bench.sink.pixel(map_to_index(x, wave_row(x, 1))), Some(WAVE));
        }

        bench.tick(&mut temperature, 1_100);
        assert_eq!(bench.sink.flush_count(), 2);
        bench.tick(&mut temperature, 1_200);
        assert_eq!(bench.sink.flush_count(), 3);
        for x in 0..32 {
            assert_eq!(bench.sink.pixel(map_to_index(x, wave_row(x, 2))), Some(WAVE));
        }
        // Telemetry keeps the last good reading
        assert_eq!(bench.controls.telemetry().temperature(), Some(21.0));
    }

    #[test]
    fn test_out_of_range_reading_shows_wave() {
        let sensor = ScriptedSensor::new([reading(21.0), reading(-3.0), reading(120.0)]);
        let mut bench = Bench::with_sensor(sensor);
        let mut temperature = TemperatureAnimation::new();

        bench.tick(&mut temperature, 0);
        bench.tick(&mut temperature, 1_000);
        assert!(temperature.is_failing());
        assert_eq!(temperature.shown(), None);
        for x in 0..32 {
            assert_eq!(bench.sink.pixel(map_to_index(x, wave_row(x, 1))), Some(WAVE));
        }
        // The raw value is still reported
        assert_eq!(bench.controls.telemetry().temperature(), Some(-3.0));

        bench.tick(&mut temperature, 2_000);
        assert!(temperature.is_failing());
        assert_eq!(bench.controls.telemetry().temperature(), Some(120.0));
    }

    #[test]
    fn test_recovery_redraws_digits() {
        let sensor = ScriptedSensor::new([Err(SensorError::ReadFailed), reading(21.0)]);
        let mut bench = Bench::with_sensor(sensor);
        let mut temperature = TemperatureAnimation::new();

        bench.tick(&mut temperature, 0);
        assert!(temperature.is_failing());
        bench.tick(&mut temperature, 1_000);
        assert!(!temperature.is_failing());
        assert_eq!(temperature.shown(), Some(21.0));
        // No red wave left on screen
        assert!(bench.sink.pixels().iter().all(|pixel| *pixel != WAVE));
    }

    #[test]
    fn test_wave_stays_on_panel() {
        for offset in 0..32 {
            for x in 0..32 {
                assert!((0..7).contains(&wave_row(x, offset)));
            }
        }
    }
}
