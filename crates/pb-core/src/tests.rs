//! Unit tests for pb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityId, SlotId, TokenId};

    #[test]
    fn index_roundtrip() {
        let id = EntityId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(EntityId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(EntityId(0) < EntityId(1));
        assert!(TokenId(100) > TokenId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(EntityId::INVALID.0, u32::MAX);
        assert_eq!(TokenId::INVALID.0, u32::MAX);
        assert_eq!(SlotId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{EntityId, EventTime, Tick, TimePolicy};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn event_time_orders_by_tick_then_epsilon() {
        assert!(EventTime::new(1, 9) < EventTime::new(2, 0));
        assert!(EventTime::new(3, 1) < EventTime::new(3, 2));
        assert_eq!(EventTime::new(3, 1), EventTime::new(3, 1));
    }

    #[test]
    fn zero_look_ahead_rejected() {
        assert!(TimePolicy::new(0).is_err());
        assert!(TimePolicy::new(1).is_ok());
    }

    #[test]
    fn zero_moduli_rejected() {
        assert!(TimePolicy::new(1).unwrap().with_moduli(0, 64).is_err());
        assert!(TimePolicy::new(1).unwrap().with_moduli(64, 0).is_err());
    }

    #[test]
    fn plain_next_time_advances_by_look_ahead() {
        let policy = TimePolicy::new(3).unwrap();
        let now = EventTime::new(10, 5);
        let next = policy.next_time(now, EntityId(7), 99);
        assert_eq!(next, EventTime::new(13, 0));
    }

    #[test]
    fn next_time_is_strictly_future() {
        let policy = TimePolicy::new(1)
            .unwrap()
            .with_stagger_tick(true)
            .with_stagger_epsilon(true);
        for id in 0..100u32 {
            for count in 0..10u64 {
                let now = EventTime::new(count, 3);
                let next = policy.next_time(now, EntityId(id), count);
                assert!(next > now, "t'={next} not after t={now}");
                assert!(next.tick.0 >= now.tick.0 + 1);
            }
        }
    }

    #[test]
    fn stagger_offset_depends_only_on_identity() {
        let policy = TimePolicy::new(1).unwrap().with_stagger_tick(true);
        let a = policy.next_time(EventTime::ZERO, EntityId(5), 0);
        let b = policy.next_time(EventTime::ZERO, EntityId(5), 123);
        assert_eq!(a.tick, b.tick, "count must not affect the tick offset");

        // Different identities spread across the tick space.
        let c = policy.next_time(EventTime::ZERO, EntityId(6), 0);
        assert_ne!(a.tick, c.tick);
    }

    #[test]
    fn shifty_epsilon_rotates_with_count() {
        let policy = TimePolicy::new(1).unwrap().with_stagger_epsilon(true);
        let e0 = policy.next_time(EventTime::ZERO, EntityId(3), 0).epsilon;
        let e1 = policy.next_time(EventTime::ZERO, EntityId(3), 1).epsilon;
        assert_eq!(e0, 3);
        assert_eq!(e1, 4);
    }

    #[test]
    fn epsilon_wraps_at_modulus() {
        let policy = TimePolicy::new(1)
            .unwrap()
            .with_stagger_epsilon(true)
            .with_moduli(64, 8)
            .unwrap();
        let e = policy.next_time(EventTime::ZERO, EntityId(6), 3).epsilon;
        assert_eq!(e, (6 + 3) % 8);
    }
}

#[cfg(test)]
mod rng {
    use crate::{RandomStream, ScriptedStream, SharedStream};

    #[test]
    fn shared_stream_is_reproducible() {
        let mut a = SharedStream::new(42);
        let mut b = SharedStream::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SharedStream::new(1);
        let mut b = SharedStream::new(2);
        let same = (0..10).filter(|_| a.next_u64() == b.next_u64()).count();
        assert!(same < 10);
    }

    #[test]
    fn f64_in_unit_interval() {
        let mut s = SharedStream::new(7);
        for _ in 0..1_000 {
            let x = s.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn next_index_in_bounds() {
        let mut s = SharedStream::new(9);
        for _ in 0..1_000 {
            assert!(s.next_index(7) < 7);
        }
    }

    #[test]
    fn derived_streams_are_reproducible_and_offset_dependent() {
        let mut da = SharedStream::new(5).derive(1);
        let mut db = SharedStream::new(5).derive(1);
        for _ in 0..20 {
            assert_eq!(da.next_u64(), db.next_u64());
        }

        let mut dc = SharedStream::new(5).derive(2);
        let same = (0..20).filter(|_| da.next_u64() == dc.next_u64()).count();
        assert!(same < 20, "different offsets must yield different streams");
    }

    #[test]
    fn scripted_stream_replays_in_order() {
        let mut s = ScriptedStream::new()
            .push_u64s([10, 20])
            .push_f64s([0.25]);
        assert_eq!(s.next_u64(), 10);
        assert_eq!(s.next_f64(), 0.25);
        assert_eq!(s.next_u64(), 20);
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn scripted_stream_panics_when_drained() {
        let mut s = ScriptedStream::new();
        let _ = s.next_u64();
    }
}
