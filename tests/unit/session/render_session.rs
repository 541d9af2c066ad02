use super::*;
use crate::compositions::Registry;
use crate::session::sink::{FingerprintSink, InMemorySink};

fn session(id: &str, opts: RenderSessionOpts) -> RenderSession {
    let comp = Registry::builtin().create(id, None).unwrap();
    RenderSession::new(comp, opts).unwrap()
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange {
        start: FrameIndex(start),
        end: FrameIndex(end),
    }
}

fn parallel(chunk_size: usize) -> RenderSessionOpts {
    RenderSessionOpts {
        parallel: true,
        chunk_size,
        threads: Some(2),
    }
}

#[test]
fn render_range_is_ordered_and_counts_changes() {
    let sess = session("StringsWalkthrough", RenderSessionOpts::default());
    let mut sink = InMemorySink::new();
    let stats = sess.render_range(range(0, 180), &mut sink).unwrap();

    assert_eq!(
        stats,
        RenderStats {
            frames_total: 180,
            frames_changed: 2,
        }
    );
    assert!(sink.is_finished());
    assert_eq!(sink.config().unwrap().frames, 180);
    for (i, (idx, scene)) in sink.scenes.iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(scene.frame.0, i as u64);
    }
}

#[test]
fn render_range_parallel_matches_sequential_output() {
    let r = range(0, 120);
    let seq = session("ProgrammerChallenge", RenderSessionOpts::default());
    let mut sink_seq = InMemorySink::new();
    let stats_seq = seq.render_range(r, &mut sink_seq).unwrap();

    let par = session("ProgrammerChallenge", parallel(7));
    let mut sink_par = InMemorySink::new();
    let stats_par = par.render_range(r, &mut sink_par).unwrap();

    assert_eq!(stats_seq, stats_par);
    assert_eq!(sink_seq.scenes, sink_par.scenes);
    assert_eq!(sink_seq.fingerprints, sink_par.fingerprints);
}

#[test]
fn render_range_rejects_bad_ranges() {
    let sess = session("StringsWalkthrough", RenderSessionOpts::default());
    let mut sink = FingerprintSink::default();
    assert!(matches!(
        sess.render_range(range(5, 5), &mut sink),
        Err(ReelError::Validation(_))
    ));
    assert!(matches!(
        sess.render_range(range(800, 811), &mut sink),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn zero_threads_is_rejected() {
    let sess = session(
        "StringsWalkthrough",
        RenderSessionOpts {
            parallel: true,
            chunk_size: 8,
            threads: Some(0),
        },
    );
    let mut sink = FingerprintSink::default();
    assert!(sess.render_range(range(0, 4), &mut sink).is_err());
}

#[test]
fn zero_chunk_size_still_renders() {
    let sess = session("ButtonTutorial", parallel(0));
    let mut sink = FingerprintSink::default();
    let stats = sess.render_range(range(890, 900), &mut sink).unwrap();
    assert_eq!(stats.frames_total, 10);
    assert_eq!(sink.fingerprints.len(), 10);
    assert_eq!(sink.fingerprints[9].0, FrameIndex(899));
}

#[test]
fn render_frame_matches_composition() {
    let sess = session("ProgrammerChallengeShort", RenderSessionOpts::default());
    assert_eq!(sess.full_range(), range(0, 450));
    let scene = sess.render_frame(FrameIndex(42)).unwrap();
    assert_eq!(scene, sess.composition().render(FrameIndex(42)).unwrap());
    assert!(sess.render_frame(FrameIndex(450)).is_err());
}
