use nature_dsp::{sounds::SoundFamily, EngineConfig, NatureEngine, SynthEvent};

const SAMPLE_RATE: f64 = 48_000.0;
const BLOCK: usize = 256;

fn engine_with_seed(seed: u32) -> NatureEngine {
    let mut engine = NatureEngine::new(EngineConfig {
        seed,
        ..EngineConfig::default()
    });
    engine.prepare(SAMPLE_RATE, BLOCK).unwrap();
    engine
}

fn render(engine: &mut NatureEngine, blocks: usize) -> (Vec<f32>, Vec<f32>) {
    let mut left_all = Vec::with_capacity(blocks * BLOCK);
    let mut right_all = Vec::with_capacity(blocks * BLOCK);
    let mut left = vec![0.0f32; BLOCK];
    let mut right = vec![0.0f32; BLOCK];
    for _ in 0..blocks {
        engine.process(&mut [&mut left[..], &mut right[..]], BLOCK);
        left_all.extend_from_slice(&left);
        right_all.extend_from_slice(&right);
    }
    (left_all, right_all)
}

fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

#[test]
fn renders_silence_with_no_voices() {
    let mut engine = engine_with_seed(1);
    let (left, right) = render(&mut engine, 40);
    assert!(left.iter().chain(&right).all(|&s| s == 0.0));
}

#[test]
fn equal_seeds_render_equal_audio() {
    let mut a = engine_with_seed(99);
    let mut b = engine_with_seed(99);
    for engine in [&mut a, &mut b] {
        engine.handle_event(SynthEvent::note_on(36, 0.9)); // rain
        engine.handle_event(SynthEvent::note_on(53, 0.5)); // swarm
        engine.handle_event(SynthEvent::note_on(62, 0.7)); // crow
    }
    assert_eq!(render(&mut a, 50), render(&mut b, 50));
}

#[test]
fn different_seeds_render_different_noise() {
    let mut a = engine_with_seed(1);
    let mut b = engine_with_seed(2);
    for engine in [&mut a, &mut b] {
        engine.handle_event(SynthEvent::note_on(36, 0.9));
    }
    assert_ne!(render(&mut a, 10).0, render(&mut b, 10).0);
}

#[test]
fn every_note_stays_finite_and_bounded_over_a_long_run() {
    for note in 36..72u8 {
        let mut engine = engine_with_seed(7);
        engine.handle_event(SynthEvent::note_on(note, 1.0));
        // Two seconds held, then half a second of release
        let (held_l, held_r) = render(&mut engine, 375);
        engine.handle_event(SynthEvent::note_off(note));
        let (tail_l, tail_r) = render(&mut engine, 100);

        for buffer in [&held_l, &held_r, &tail_l, &tail_r] {
            assert!(buffer.iter().all(|s| s.is_finite()), "note {note} not finite");
            assert!(peak(buffer) < 1.0, "note {note} peaked at {}", peak(buffer));
        }
        assert!(peak(&held_l) > 1e-4, "note {note} is silent");
        assert_eq!(engine.active_voice_count(), 0, "note {note} never released");
    }
}

#[test]
fn every_family_is_reachable_from_the_keyboard() {
    let mut seen = Vec::new();
    for note in 36..72u8 {
        let mut engine = engine_with_seed(3);
        engine.handle_event(SynthEvent::note_on(note, 0.5));
        let family = engine.voices()[0].family();
        if !seen.contains(&family) {
            seen.push(family);
        }
    }
    for family in SoundFamily::ALL {
        assert!(seen.contains(&family), "{} unreachable", family.name());
    }
}

#[test]
fn master_level_zero_silences_output() {
    let mut engine = engine_with_seed(5);
    engine.set_parameter("master_level", 0.0);
    engine.handle_event(SynthEvent::note_on(44, 1.0));
    let (left, right) = render(&mut engine, 20);
    assert!(left.iter().chain(&right).all(|&s| s == 0.0));
}

#[test]
fn reverb_tail_outlives_the_voice() {
    let mut engine = engine_with_seed(5);
    engine.set_parameter("reverb_mix", 1.0);
    engine.set_parameter("reverb_room_size", 1.0);
    engine.handle_event(SynthEvent::note_on(68, 1.0)); // deer
    render(&mut engine, 20);
    engine.handle_event(SynthEvent::Reset);

    let (left, _) = render(&mut engine, 4);
    assert_eq!(engine.active_voice_count(), 0);
    assert!(peak(&left) > 0.0, "panic should leave the reverb ringing");
}
