mod tests {
    use embassy_time::{Duration, Instant};
    use led_planter::color::{Rgb, WHITE, scale_color};
    use led_planter::config::EEPROM_SIZE;
    use led_planter::storage::{EffectName, MemoryStorage, SaveOutcome, SettingsStore};
    use led_planter::{
        CommandChannel, CommandError, CommandSink, ControllerConfig, EffectId, FrameScheduler,
        LightCommand, LightCommands, LightController, Persist, SplitMix, StatusBoard, StripDriver,
    };

    const LEDS: usize = 14;
    const QUEUE: usize = 4;
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    type Storage = MemoryStorage<EEPROM_SIZE>;
    type Controller<'a> = LightController<'a, Storage, SplitMix, LEDS, QUEUE>;

    fn at(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    fn controller<'a>(
        storage: Storage,
        channel: &'a CommandChannel<QUEUE>,
        status: &'a StatusBoard,
    ) -> Controller<'a> {
        LightController::new(
            storage,
            SplitMix::new(7),
            channel.receiver(),
            status,
            &ControllerConfig::default(),
        )
    }

    /// Storage whose persisted effect is `effect`
    fn storage_with_effect(effect: &str) -> Storage {
        let mut store = SettingsStore::new(Storage::erased());
        store.initialize();
        store.set_effect(effect, true, at(0));
        store.into_storage()
    }

    #[derive(Default)]
    struct RecordingDriver {
        frames: usize,
        last: [Rgb; LEDS],
    }

    impl StripDriver for RecordingDriver {
        fn transmit(&mut self, frame: &[Rgb]) {
            self.frames += 1;
            self.last.copy_from_slice(frame);
        }
    }

    #[test]
    fn test_starts_from_persisted_settings() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(storage_with_effect("wave"), &channel, &status);

        assert_eq!(controller.state().effect, Some(EffectId::Wave));
        assert_eq!(status.effect_name(), "wave");
        assert_eq!(status.brightness(), 255);

        controller.render(at(0));
        assert_eq!(controller.engine().wave().phase(), 2);
    }

    #[test]
    fn test_first_frame_is_solid_white() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(Storage::erased(), &channel, &status);

        assert_eq!(controller.render(at(0)), &[WHITE; LEDS]);
        assert!(controller.settings().is_initialized());
    }

    #[test]
    fn test_commands_apply_at_tick_boundary() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(Storage::erased(), &channel, &status);
        let commands = LightCommands::new(channel.sender(), &status, Persist::Deferred);

        commands.on_color(RED).unwrap();
        commands.on_brightness(128).unwrap();
        assert_eq!(commands.color(), WHITE);
        assert_eq!(channel.len(), 2);

        let output = controller.render(at(20));
        assert_eq!(output, &[scale_color(RED, 128); LEDS]);
        assert!(channel.is_empty());
        assert_eq!(commands.color(), RED);
        assert_eq!(commands.brightness(), 128);
        assert_eq!(commands.snapshot().color_hex().as_str(), "#FF0000");
    }

    #[test]
    fn test_brightness_does_not_touch_frame_buffer() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(Storage::erased(), &channel, &status);

        controller.apply(LightCommand::SetBrightness(0, Persist::Deferred), at(0));
        assert_eq!(controller.render(at(0)), &[BLACK; LEDS]);
        assert_eq!(controller.frame().pixels(), &[WHITE; LEDS]);
        assert!(!status.snapshot().is_on());
    }

    #[test]
    fn test_unknown_effect_is_rejected_by_adapter() {
        let channel = CommandChannel::<QUEUE>::new();
        let status = StatusBoard::new();
        let commands = LightCommands::new(channel.sender(), &status, Persist::Immediate);

        assert_eq!(commands.on_effect("disco"), Err(CommandError::UnknownEffect));
        assert_eq!(commands.on_effect("Ripple"), Err(CommandError::UnknownEffect));
        assert!(channel.is_empty());
        assert_eq!(commands.on_effect("ripple"), Ok(()));
        assert_eq!(
            channel.try_receive(),
            Ok(LightCommand::SetEffect(
                EffectName::new("ripple"),
                Persist::Immediate
            ))
        );
    }

    #[test]
    fn test_packed_color_is_unpacked() {
        let channel = CommandChannel::<QUEUE>::new();
        let status = StatusBoard::new();
        let commands = LightCommands::new(channel.sender(), &status, Persist::Immediate);

        commands.on_color_packed(0x00FF_8000).unwrap();
        assert_eq!(
            channel.try_receive(),
            Ok(LightCommand::SetColor(
                Rgb::new(0xFF, 0x80, 0x00),
                Persist::Immediate
            ))
        );
    }

    #[test]
    fn test_full_queue_is_reported() {
        let channel = CommandChannel::<QUEUE>::new();
        let status = StatusBoard::new();
        let commands = LightCommands::new(channel.sender(), &status, Persist::Deferred);

        for level in 0..QUEUE as u8 {
            assert_eq!(commands.on_brightness(level), Ok(()));
        }
        assert_eq!(commands.on_brightness(99), Err(CommandError::QueueFull));
    }

    #[test]
    fn test_unknown_stored_effect_holds_frame() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(storage_with_effect("disco"), &channel, &status);

        assert_eq!(controller.state().effect, None);
        assert_eq!(status.effect_name(), "disco");
        assert_eq!(controller.render(at(0)), &[BLACK; LEDS]);
    }

    #[test]
    fn test_unknown_effect_keeps_last_frame() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(Storage::erased(), &channel, &status);

        controller.apply(LightCommand::SetColor(RED, Persist::Deferred), at(0));
        controller.render(at(0));

        controller.apply(
            LightCommand::SetEffect(EffectName::new("disco"), Persist::Deferred),
            at(20),
        );
        controller.apply(LightCommand::SetColor(BLUE, Persist::Deferred), at(20));
        for tick in 2..10 {
            assert_eq!(controller.render(at(tick * 20)), &[RED; LEDS]);
        }
        assert_eq!(controller.state().color, BLUE);
    }

    #[test]
    fn test_immediate_commands_persist() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(Storage::erased(), &channel, &status);

        let outcome = controller.apply(LightCommand::SetBrightness(77, Persist::Immediate), at(10));
        assert_eq!(outcome, SaveOutcome::Written);
        let outcome = controller.apply(LightCommand::SetBrightness(77, Persist::Immediate), at(20));
        assert_eq!(outcome, SaveOutcome::Unchanged);
    }

    #[test]
    fn test_deferred_command_is_flushed_by_render() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(Storage::erased(), &channel, &status);

        let outcome = controller.apply(LightCommand::SetBrightness(77, Persist::Deferred), at(10));
        assert_eq!(outcome, SaveOutcome::Deferred);
        controller.render(at(1_000));
        assert!(controller.settings().is_pending());
        controller.render(at(5_000));
        assert!(!controller.settings().is_pending());
        assert_eq!(controller.settings().storage().commit_count(), 2);
    }

    #[test]
    fn test_ripple_uses_slower_frame_period() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let mut controller = controller(Storage::erased(), &channel, &status);

        assert_eq!(controller.frame_period(), Duration::from_millis(20));
        controller.apply(
            LightCommand::SetEffect(EffectName::new("ripple"), Persist::Deferred),
            at(0),
        );
        assert_eq!(controller.frame_period(), Duration::from_millis(50));
    }

    #[test]
    fn test_scheduler_paces_frames() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let controller = controller(Storage::erased(), &channel, &status);
        let mut scheduler = FrameScheduler::new(controller, RecordingDriver::default());

        let result = scheduler.tick(at(0));
        assert_eq!(result.next_deadline, at(20));
        assert_eq!(result.sleep_duration, Duration::from_millis(20));

        let result = scheduler.tick(at(25));
        assert_eq!(result.next_deadline, at(40));
        assert_eq!(result.sleep_duration, Duration::from_millis(15));

        assert_eq!(scheduler.driver().frames, 2);
        assert_eq!(scheduler.driver().last, [WHITE; LEDS]);
    }

    #[test]
    fn test_scheduler_resets_after_large_drift() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let controller = controller(Storage::erased(), &channel, &status);
        let mut scheduler = FrameScheduler::new(controller, RecordingDriver::default());

        scheduler.tick(at(0));
        let result = scheduler.tick(at(500));
        assert_eq!(result.next_deadline, at(520));

        // Slightly late: catch up without sleeping
        let result = scheduler.tick(at(550));
        assert_eq!(result.next_deadline, at(540));
        assert_eq!(result.sleep_duration, Duration::from_millis(0));
    }

    #[test]
    fn test_scheduler_follows_effect_period() {
        let channel = CommandChannel::new();
        let status = StatusBoard::new();
        let controller = controller(Storage::erased(), &channel, &status);
        let mut scheduler = FrameScheduler::new(controller, RecordingDriver::default());
        let commands = LightCommands::new(channel.sender(), &status, Persist::Deferred);

        commands.on_effect("ripple").unwrap();
        let result = scheduler.tick(at(0));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));
        assert_eq!(scheduler.controller().state().effect, Some(EffectId::Ripple));
    }
}
