mod tests {
    use embassy_time::Instant;
    use myrtio_status_light::protocol::{Frame, HANDLER_ANIMATION, HANDLER_LOCAL, checksum};
    use myrtio_status_light::{ConnectionState, Dispatch, Indicator, Link, LinkConfig};

    const KEEP_ALIVE: [u8; 8] = [0xFF, 0x00, 0x08, 0x02, 0x01, 0x00, 0x03, 0xFE];
    const REBOOT: [u8; 8] = [0xFF, 0x00, 0x08, 0x02, 0x02, 0x00, 0x04, 0xFE];

    fn at(secs: u64) -> Instant {
        Instant::from_secs(secs)
    }

    fn stop_frame() -> Frame {
        Frame::build(HANDLER_ANIMATION, &[0x02, 0x00]).unwrap()
    }

    /// Valid frame longer than any command
    fn oversized_frame(handler: u8) -> Vec<u8> {
        let body = [0x01; 33];
        let len = body.len() + 7;
        let mut bytes = vec![0xFF, 0x00, len as u8, handler];
        bytes.extend_from_slice(&body);
        let sum = checksum(&bytes[3..]);
        bytes.extend_from_slice(&sum.to_be_bytes());
        bytes.push(0xFE);
        bytes
    }

    fn connected_link(now: Instant) -> Link {
        let mut link = Link::new(at(0), LinkConfig::default());
        link.ingest(&KEEP_ALIVE);
        link.next_dispatch(now).unwrap();
        assert_eq!(link.state(), ConnectionState::Active);
        link
    }

    fn timed_out_link() -> Link {
        let mut link = Link::new(at(0), LinkConfig::default());
        assert_eq!(link.check_timeouts(at(121)), Some(Indicator::Error));
        link
    }

    #[test]
    fn test_initial_timeout() {
        let mut link = Link::new(at(0), LinkConfig::default());

        assert_eq!(link.check_timeouts(at(119)), None);
        assert_eq!(link.check_timeouts(at(120)), None);
        assert_eq!(link.state(), ConnectionState::Initial);

        assert_eq!(
            link.check_timeouts(Instant::from_millis(120_001)),
            Some(Indicator::Error)
        );
        assert_eq!(link.state(), ConnectionState::Error);
        assert_eq!(link.check_timeouts(at(500)), None);
    }

    #[test]
    fn test_first_frame_connects() {
        let mut link = Link::new(at(0), LinkConfig::default());
        link.ingest(&KEEP_ALIVE);

        let dispatch = link.next_dispatch(at(10)).unwrap();
        assert_eq!(
            dispatch,
            Dispatch {
                indicator: Some(Indicator::CancelStartup),
                forward: None,
            }
        );
        assert_eq!(link.state(), ConnectionState::Active);
        assert!(link.next_dispatch(at(10)).is_none());
    }

    #[test]
    fn test_keepalive_timeout() {
        let mut link = connected_link(at(10));

        assert_eq!(link.check_timeouts(at(70)), None);
        assert_eq!(link.state(), ConnectionState::Active);
        assert_eq!(
            link.check_timeouts(Instant::from_millis(70_001)),
            Some(Indicator::Error)
        );
        assert_eq!(link.state(), ConnectionState::Error);
    }

    #[test]
    fn test_keepalive_refreshes_deadline() {
        let mut link = connected_link(at(10));

        link.ingest(&KEEP_ALIVE);
        let dispatch = link.next_dispatch(at(50)).unwrap();
        assert!(!dispatch.has_effects());
        assert_eq!(link.state(), ConnectionState::Active);

        assert_eq!(link.check_timeouts(at(100)), None);
        assert_eq!(link.check_timeouts(at(111)), Some(Indicator::Error));
    }

    #[test]
    fn test_animation_frame_forwarded_and_refreshes() {
        let mut link = connected_link(at(10));

        link.ingest(stop_frame().as_bytes());
        let dispatch = link.next_dispatch(at(60)).unwrap();
        assert_eq!(dispatch.indicator, None);
        assert_eq!(dispatch.forward, Some(stop_frame()));

        assert_eq!(link.check_timeouts(at(110)), None);
    }

    #[test]
    fn test_first_frame_forwarded_when_animation() {
        let mut link = Link::new(at(0), LinkConfig::default());
        link.ingest(stop_frame().as_bytes());

        let dispatch = link.next_dispatch(at(5)).unwrap();
        assert_eq!(dispatch.indicator, Some(Indicator::CancelStartup));
        assert_eq!(dispatch.forward, Some(stop_frame()));
    }

    #[test]
    fn test_reboot_from_active() {
        let mut link = connected_link(at(10));

        link.ingest(&REBOOT);
        let dispatch = link.next_dispatch(at(30)).unwrap();
        assert_eq!(dispatch.indicator, Some(Indicator::Startup));
        assert_eq!(dispatch.forward, None);
        assert_eq!(link.state(), ConnectionState::Initial);

        assert_eq!(link.check_timeouts(at(150)), None);
        assert_eq!(link.check_timeouts(at(151)), Some(Indicator::Error));
    }

    #[test]
    fn test_reboot_from_error() {
        let mut link = timed_out_link();

        link.ingest(&REBOOT);
        let dispatch = link.next_dispatch(at(200)).unwrap();
        assert_eq!(dispatch.indicator, Some(Indicator::Startup));
        assert_eq!(link.state(), ConnectionState::Initial);

        link.ingest(&KEEP_ALIVE);
        let dispatch = link.next_dispatch(at(201)).unwrap();
        assert_eq!(dispatch.indicator, Some(Indicator::CancelStartup));
        assert_eq!(link.state(), ConnectionState::Active);
    }

    #[test]
    fn test_error_drops_other_frames() {
        let mut link = timed_out_link();

        link.ingest(stop_frame().as_bytes());
        link.ingest(&KEEP_ALIVE);

        assert_eq!(link.next_dispatch(at(200)), Some(Dispatch::default()));
        assert_eq!(link.next_dispatch(at(200)), Some(Dispatch::default()));
        assert!(link.next_dispatch(at(200)).is_none());
        assert_eq!(link.state(), ConnectionState::Error);
        assert_eq!(link.buffered(), 0);
    }

    #[test]
    fn test_unknown_handler_dropped() {
        let mut link = connected_link(at(10));
        let frame = Frame::build(0x03, &[0x01]).unwrap();

        link.ingest(frame.as_bytes());
        let dispatch = link.next_dispatch(at(20)).unwrap();
        assert!(!dispatch.has_effects());
        assert_eq!(link.state(), ConnectionState::Active);
    }

    #[test]
    fn test_malformed_local_frame_dropped() {
        let mut link = connected_link(at(10));
        let frame = Frame::build(HANDLER_LOCAL, &[0x02, 0x00]).unwrap();

        link.ingest(frame.as_bytes());
        let dispatch = link.next_dispatch(at(20)).unwrap();
        assert!(!dispatch.has_effects());
        assert_eq!(link.state(), ConnectionState::Active);
    }

    #[test]
    fn test_fragmented_frames_dispatched_in_order() {
        let mut link = Link::new(at(0), LinkConfig::default());
        let mut bytes = KEEP_ALIVE.to_vec();
        bytes.extend_from_slice(stop_frame().as_bytes());
        let (head, tail) = bytes.split_at(11);

        link.ingest(head);
        let first = link.next_dispatch(at(1)).unwrap();
        assert_eq!(first.indicator, Some(Indicator::CancelStartup));
        assert!(link.next_dispatch(at(1)).is_none());
        assert_eq!(link.buffered(), 3);

        link.ingest(tail);
        let second = link.next_dispatch(at(2)).unwrap();
        assert_eq!(second.forward, Some(stop_frame()));
    }

    #[test]
    fn test_oversized_frame_connects() {
        let mut link = Link::new(at(0), LinkConfig::default());
        link.ingest(&oversized_frame(0x03));

        let dispatch = link.next_dispatch(at(10)).unwrap();
        assert_eq!(
            dispatch,
            Dispatch {
                indicator: Some(Indicator::CancelStartup),
                forward: None,
            }
        );
        assert_eq!(link.state(), ConnectionState::Active);
        assert_eq!(link.buffered(), 0);

        assert_eq!(link.check_timeouts(at(70)), None);
        assert_eq!(link.state(), ConnectionState::Active);
        assert_eq!(link.check_timeouts(at(71)), Some(Indicator::Error));
    }

    #[test]
    fn test_oversized_frame_refreshes_keepalive() {
        let mut link = connected_link(at(10));
        link.ingest(&oversized_frame(HANDLER_ANIMATION));

        let dispatch = link.next_dispatch(at(50)).unwrap();
        assert!(!dispatch.has_effects());
        assert_eq!(link.check_timeouts(at(100)), None);
        assert_eq!(link.state(), ConnectionState::Active);
    }

    #[test]
    fn test_oversized_frame_ignored_in_error() {
        let mut link = timed_out_link();
        link.ingest(&oversized_frame(HANDLER_LOCAL));

        assert_eq!(link.next_dispatch(at(200)), Some(Dispatch::default()));
        assert_eq!(link.state(), ConnectionState::Error);
    }

    #[test]
    fn test_reboot_from_initial() {
        let mut link = Link::new(at(0), LinkConfig::default());

        link.ingest(&REBOOT);
        let dispatch = link.next_dispatch(at(30)).unwrap();
        assert_eq!(dispatch.indicator, Some(Indicator::Startup));
        assert_eq!(dispatch.forward, None);
        assert_eq!(link.state(), ConnectionState::Initial);

        assert_eq!(link.check_timeouts(at(121)), None);
        assert_eq!(link.check_timeouts(at(150)), None);
        assert_eq!(link.state(), ConnectionState::Initial);
        assert_eq!(link.check_timeouts(at(151)), Some(Indicator::Error));
    }
}
