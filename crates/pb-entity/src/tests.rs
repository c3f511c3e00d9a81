//! Unit tests for entity behaviors, configuration validation, and the
//! destination selector.

use std::sync::Arc;

use pb_core::{EntityId, EventTime, ScriptedStream, SharedStream, SlotId};
use pb_event::{Payload, Provenance};

use crate::config::{EntityConfig, VariantKind};
use crate::context::EngineContext;
use crate::core::{EntityCore, PeerRegistry};
use crate::model::BenchEntity;
use crate::variants::build_entity;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn wired_entity(cfg: &EntityConfig, id: u32, peer_count: usize) -> Box<dyn BenchEntity> {
    let mut e = build_entity(EntityId(id), format!("Entity_{id}"), cfg).unwrap();
    e.core_mut().set_peers(Arc::new(PeerRegistry::new(peer_count)));
    e
}

fn wired_core(cfg: &EntityConfig, id: u32, peer_count: usize) -> EntityCore {
    let mut core = EntityCore::new(EntityId(id), format!("Entity_{id}"), cfg).unwrap();
    core.set_peers(Arc::new(PeerRegistry::new(peer_count)));
    core
}

// ── Configuration validation ──────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn defaults_validate() {
        for variant in [
            VariantKind::Simple,
            VariantKind::Alloc,
            VariantKind::Memory,
            VariantKind::Sha,
            VariantKind::Phold,
            VariantKind::Mix,
            VariantKind::Bounce,
        ] {
            EntityConfig::for_variant(variant).validate().unwrap();
        }
    }

    #[test]
    fn variant_tag_parses_and_round_trips() {
        for tag in ["simple", "alloc", "memory", "sha", "phold", "mix", "bounce"] {
            let kind: VariantKind = tag.parse().unwrap();
            assert_eq!(kind.to_string(), tag);
        }
    }

    #[test]
    fn unknown_variant_tag_is_fatal() {
        assert!("quantum".parse::<VariantKind>().is_err());
    }

    #[test]
    fn zero_look_ahead_rejected() {
        let cfg = EntityConfig { look_ahead: 0, ..EntityConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn probability_out_of_range_rejected() {
        for p in [-0.1, 1.5, f64::NAN] {
            let cfg = EntityConfig {
                variant: VariantKind::Phold,
                remote_probability: p,
                ..EntityConfig::default()
            };
            assert!(cfg.validate().is_err(), "p={p} should be rejected");
        }
    }

    #[test]
    fn single_slot_variants_are_local_only() {
        for variant in [VariantKind::Simple, VariantKind::Memory, VariantKind::Sha, VariantKind::Mix]
        {
            let cfg = EntityConfig {
                variant,
                remote_probability: 0.5,
                ..EntityConfig::default()
            };
            assert!(cfg.validate().is_err(), "{variant} must reject remote routing");
        }
    }

    #[test]
    fn block_larger_than_buffer_rejected() {
        let cfg = EntityConfig {
            variant: VariantKind::Memory,
            buffer_bytes: 1024,
            block_bytes: 2048,
            ..EntityConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unsupported_digest_width_rejected() {
        let cfg = EntityConfig {
            variant: VariantKind::Sha,
            digest_bits: 128,
            ..EntityConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn shallow_epoch_pool_rejected() {
        let cfg = EntityConfig {
            variant: VariantKind::Mix,
            epoch_depth: 1,
            ..EntityConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_token_population_rejected() {
        let cfg = EntityConfig {
            variant: VariantKind::Bounce,
            tokens: 0,
            ..EntityConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}

// ── Destination selector ──────────────────────────────────────────────────────

#[cfg(test)]
mod selector {
    use super::*;

    fn phold_cfg(p: f64) -> EntityConfig {
        EntityConfig {
            variant: VariantKind::Phold,
            remote_probability: p,
            ..EntityConfig::default()
        }
    }

    #[test]
    fn zero_probability_never_routes_remote() {
        let core = wired_core(&phold_cfg(0.0), 0, 8);
        let mut stream = SharedStream::new(7);
        for _ in 0..1_000 {
            assert_eq!(core.next_dest(&mut stream), EntityId(0));
        }
    }

    #[test]
    fn unit_probability_never_self_routes() {
        let core = wired_core(&phold_cfg(1.0), 2, 8);
        let mut stream = SharedStream::new(7);
        for _ in 0..1_000 {
            assert_ne!(core.next_dest(&mut stream), EntityId(2));
        }
    }

    #[test]
    fn single_entity_degenerates_to_local() {
        let core = wired_core(&phold_cfg(1.0), 0, 1);
        let mut stream = SharedStream::new(7);
        for _ in 0..100 {
            assert_eq!(core.next_dest(&mut stream), EntityId(0));
        }
    }

    #[test]
    fn unwired_registry_degenerates_to_local() {
        let core = EntityCore::new(EntityId(4), "Entity_4".into(), &phold_cfg(1.0)).unwrap();
        let mut stream = SharedStream::new(7);
        assert_eq!(core.next_dest(&mut stream), EntityId(4));
    }

    #[test]
    fn remote_fraction_converges_to_probability() {
        let p = 0.3;
        let core = wired_core(&phold_cfg(p), 0, 4);
        let mut stream = SharedStream::new(42);
        let n = 20_000;
        let remote = (0..n)
            .filter(|_| core.next_dest(&mut stream) != EntityId(0))
            .count();
        let fraction = remote as f64 / n as f64;
        assert!(
            (fraction - p).abs() < 0.02,
            "remote fraction {fraction} too far from {p}"
        );
    }

    #[test]
    fn remote_index_shifts_past_self() {
        // Entity 1 of 3; first roll goes remote with index draw 0 → peer 0,
        // second with index draw 1 → shifted past self → peer 2.
        let core = wired_core(&phold_cfg(1.0), 1, 3);
        let mut stream = ScriptedStream::new()
            .push_f64s([0.0, 0.0])
            .push_u64s([0, 1]);
        assert_eq!(core.next_dest(&mut stream), EntityId(0));
        assert_eq!(core.next_dest(&mut stream), EntityId(2));
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn local_roll_consumes_no_index_draw() {
        let core = wired_core(&phold_cfg(0.5), 0, 4);
        let mut stream = ScriptedStream::new().push_f64s([0.9]);
        assert_eq!(core.next_dest(&mut stream), EntityId(0));
        assert_eq!(stream.remaining(), 0);
    }
}

// ── Variant behaviors ─────────────────────────────────────────────────────────

#[cfg(test)]
mod variants {
    use super::*;

    #[test]
    fn simple_chains_one_self_event_per_cycle() {
        let cfg = EntityConfig::for_variant(VariantKind::Simple);
        let mut e = wired_entity(&cfg, 3, 4);
        let mut stream = SharedStream::new(1);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        let first = e.initialize(&mut ctx);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].dest, EntityId(3));
        assert_eq!(first[0].time, EventTime::new(1, 0));
        assert_eq!(
            first[0].payload,
            Payload::Counters { a: -3, b: 3, c: 3 }
        );

        // Engine consumes the slot, then dispatches.
        e.release_slot(SlotId(0));
        let mut ctx = EngineContext::new(first[0].time, &mut stream);
        let next = e.handle(first[0], &mut ctx);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].payload, Payload::Counters { a: -2, b: 4, c: 4 });
        assert_eq!(e.core().handled(), 1);
        assert_eq!(e.stats().staleness_violations, 0);
    }

    #[test]
    fn stopped_entity_suppresses_follow_ups() {
        let cfg = EntityConfig::for_variant(VariantKind::Simple);
        let mut e = wired_entity(&cfg, 0, 1);
        let mut stream = SharedStream::new(1);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        let first = e.initialize(&mut ctx);

        e.core().stop_handle().stop();
        e.release_slot(SlotId(0));
        let mut ctx = EngineContext::new(first[0].time, &mut stream);
        let out = e.handle(first[0], &mut ctx);
        assert!(out.is_empty(), "stopped entity must not resubmit");
        // The delivery itself is still counted — stop is lazy.
        assert_eq!(e.core().handled(), 1);
    }

    #[test]
    fn phold_reroutes_the_same_record_by_value() {
        let cfg = EntityConfig {
            variant: VariantKind::Phold,
            remote_probability: 1.0,
            initial_events: 2,
            ..EntityConfig::default()
        };
        let mut e = wired_entity(&cfg, 0, 4);
        let mut stream = SharedStream::new(9);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        let seeded = e.initialize(&mut ctx);
        assert_eq!(seeded.len(), 2);
        assert!(seeded.iter().all(|r| r.provenance == Provenance::Fresh));

        let mut ctx = EngineContext::new(seeded[0].time, &mut stream);
        let out = e.handle(seeded[0], &mut ctx);
        assert_eq!(out.len(), 1);
        assert_ne!(out[0].dest, EntityId(0), "p=1 must not self-route");
        assert!(out[0].time > seeded[0].time);
    }

    #[test]
    fn phold_absorbs_after_stop() {
        let cfg = EntityConfig::for_variant(VariantKind::Phold);
        let mut e = wired_entity(&cfg, 0, 2);
        let mut stream = SharedStream::new(9);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        let seeded = e.initialize(&mut ctx);
        e.core().stop();
        let mut ctx = EngineContext::new(seeded[0].time, &mut stream);
        assert!(e.handle(seeded[0], &mut ctx).is_empty());
        assert_eq!(e.stats().absorbed, 1);
    }

    #[test]
    fn mix_emits_one_cycle_event_plus_fanout_probes() {
        let cfg = EntityConfig {
            variant: VariantKind::Mix,
            fanout: 3,
            ..EntityConfig::default()
        };
        let mut e = wired_entity(&cfg, 1, 4);
        let mut stream = SharedStream::new(5);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        let out = e.initialize(&mut ctx);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].payload, Payload::Cycle);
        assert_eq!(out[0].dest, EntityId(1));
        for probe in &out[1..] {
            assert_eq!(probe.payload, Payload::Probe);
            match probe.provenance {
                Provenance::Slot { origin, slot } => {
                    assert_eq!(origin, EntityId(1));
                    assert!(slot.0 >= 1, "probe slots are published shifted past the cycle slot");
                }
                Provenance::Fresh => panic!("probes must be pooled"),
            }
        }
    }

    #[test]
    fn mix_probe_delivery_does_not_count_as_handled() {
        let cfg = EntityConfig::for_variant(VariantKind::Mix);
        let mut e = wired_entity(&cfg, 0, 2);
        let mut stream = SharedStream::new(5);

        let probe = pb_event::EventRecord::fresh(
            EntityId(0),
            EventTime::new(1, 0),
            Payload::Probe,
        );
        let mut ctx = EngineContext::new(probe.time, &mut stream);
        assert!(e.handle(probe, &mut ctx).is_empty());
        assert_eq!(e.core().handled(), 0);
        assert_eq!(e.stats().payload_ops, 1);
    }

    #[test]
    fn mix_two_cycles_use_alternating_probe_epochs() {
        let cfg = EntityConfig {
            variant: VariantKind::Mix,
            fanout: 2,
            ..EntityConfig::default()
        };
        let mut e = wired_entity(&cfg, 0, 2);
        let mut stream = SharedStream::new(5);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        let first = e.initialize(&mut ctx);
        let slots_a: Vec<u32> = first[1..]
            .iter()
            .map(|r| match r.provenance {
                Provenance::Slot { slot, .. } => slot.0,
                Provenance::Fresh => unreachable!(),
            })
            .collect();

        // Engine consumes everything from cycle one, then delivers the
        // cycle event.
        e.release_slot(SlotId(0));
        for &s in &slots_a {
            e.release_slot(SlotId(s));
        }
        let mut ctx = EngineContext::new(first[0].time, &mut stream);
        let second = e.handle(first[0], &mut ctx);
        let slots_b: Vec<u32> = second[1..]
            .iter()
            .map(|r| match r.provenance {
                Provenance::Slot { slot, .. } => slot.0,
                Provenance::Fresh => unreachable!(),
            })
            .collect();

        assert!(slots_a.iter().all(|s| !slots_b.contains(s)));
        assert_eq!(e.stats().staleness_violations, 0);
    }

    #[test]
    fn bounce_injector_launches_whole_population() {
        let cfg = EntityConfig {
            variant: VariantKind::Bounce,
            tokens: 5,
            ..EntityConfig::default()
        };
        let mut injector = wired_entity(&cfg, 0, 4);
        let mut other = wired_entity(&cfg, 1, 4);
        let mut stream = SharedStream::new(3);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        let launched = injector.initialize(&mut ctx);
        assert_eq!(launched.len(), 5);
        let ids: Vec<_> = launched
            .iter()
            .map(|r| match r.payload {
                Payload::Token(t) => t.0,
                _ => panic!("expected token payload"),
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        assert!(other.initialize(&mut ctx).is_empty());
    }

    #[test]
    fn bounce_forwards_token_until_stopped() {
        let cfg = EntityConfig {
            variant: VariantKind::Bounce,
            tokens: 1,
            ..EntityConfig::default()
        };
        let mut e = wired_entity(&cfg, 1, 4);
        let mut stream = SharedStream::new(3);

        let token = pb_event::EventRecord::fresh(
            EntityId(1),
            EventTime::new(1, 0),
            Payload::Token(pb_core::TokenId(0)),
        );
        let mut ctx = EngineContext::new(token.time, &mut stream);
        let out = e.handle(token, &mut ctx);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payload, Payload::Token(pb_core::TokenId(0)));

        e.core().stop();
        let mut ctx = EngineContext::new(out[0].time, &mut stream);
        assert!(e.handle(out[0], &mut ctx).is_empty());
        assert_eq!(e.stats().absorbed, 1);
    }

    #[test]
    fn memory_move_preserves_buffer_discipline() {
        let cfg = EntityConfig {
            variant: VariantKind::Memory,
            buffer_bytes: 8192,
            block_bytes: 512,
            ..EntityConfig::default()
        };
        let mut e = wired_entity(&cfg, 0, 1);
        let mut stream = SharedStream::new(11);

        let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
        let first = e.initialize(&mut ctx);
        assert_eq!(first.len(), 1);
        assert!(matches!(first[0].payload, Payload::Block { offset } if offset < 8192));

        let mut record = first[0];
        for _ in 0..50 {
            e.release_slot(SlotId(0));
            let mut ctx = EngineContext::new(record.time, &mut stream);
            let out = e.handle(record, &mut ctx);
            assert_eq!(out.len(), 1);
            record = out[0];
        }
        assert_eq!(e.stats().payload_ops, 50);
        assert_eq!(e.stats().staleness_violations, 0);
    }

    #[test]
    fn sha_digest_runs_per_cycle() {
        for bits in [256u32, 512] {
            let cfg = EntityConfig {
                variant: VariantKind::Sha,
                digest_bits: bits,
                ..EntityConfig::default()
            };
            let mut e = wired_entity(&cfg, 0, 1);
            let mut stream = SharedStream::new(2);

            let mut ctx = EngineContext::new(EventTime::ZERO, &mut stream);
            let mut record = e.initialize(&mut ctx)[0];
            for _ in 0..10 {
                e.release_slot(SlotId(0));
                let mut ctx = EngineContext::new(record.time, &mut stream);
                record = e.handle(record, &mut ctx)[0];
            }
            assert_eq!(e.stats().payload_ops, 10);
        }
    }
}
