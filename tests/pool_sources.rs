use std::io::Write;
use std::sync::Arc;

use examdraw::config::{Composition, SamplerOptions};
use examdraw::data::{Difficulty, SamplingRequest};
use examdraw::pool::QuestionPool;
use examdraw::registry::CompositionRegistry;
use examdraw::sampler::{DeterministicRng, StratifiedSampler};
use examdraw::source::{JsonSnapshotSource, QuestionFeed, QuestionSource};
use examdraw::utils::{make_group, make_question};

fn snapshot_feed() -> QuestionFeed {
    let spec = [("networking", 60.0), ("storage", 40.0)];
    QuestionFeed {
        groups: spec
            .iter()
            .map(|(id, weight)| make_group(id, *weight))
            .collect(),
        questions: spec
            .iter()
            .flat_map(|(id, _)| {
                (0..12).map(move |idx| make_question(id, &format!("q{idx}"), Difficulty::Medium))
            })
            .collect(),
    }
}

#[test]
fn snapshot_source_feeds_an_end_to_end_draw() {
    let mut file = tempfile::NamedTempFile::new().expect("temp snapshot");
    let payload = serde_json::to_string(&snapshot_feed()).expect("encode feed");
    file.write_all(payload.as_bytes()).expect("write snapshot");

    let source = JsonSnapshotSource::new("bundled_snapshot", file.path());
    let feed = source.load().expect("load snapshot");
    assert_eq!(feed.groups.len(), 2);
    assert_eq!(feed.questions.len(), 24);

    let pool = Arc::new(QuestionPool::from_feed(feed));
    let sampler = StratifiedSampler::new(pool, SamplerOptions::default());
    let mut rng = DeterministicRng::new(21);
    let result = sampler
        .sample(&SamplingRequest::across_all(10), &mut rng)
        .unwrap();
    assert_eq!(result.len(), 10);
    assert_eq!(result.drawn_in("networking"), 6);
    assert_eq!(result.drawn_in("storage"), 4);
}

#[test]
fn snapshot_round_trips_question_metadata() {
    let feed = snapshot_feed();
    let payload = serde_json::to_string(&feed).expect("encode feed");
    let decoded: QuestionFeed = serde_json::from_str(&payload).expect("decode feed");
    let original = &feed.questions[0];
    let restored = decoded
        .questions
        .iter()
        .find(|question| question.id == original.id)
        .expect("question survives the round trip");
    assert_eq!(restored.group, original.group);
    assert_eq!(restored.options, original.options);
    assert_eq!(restored.correct_option, original.correct_option);
    assert_eq!(restored.difficulty, original.difficulty);
    assert_eq!(restored.authored_at, original.authored_at);
}

#[test]
fn registry_composition_drives_a_full_mock_exam() {
    let composition = Composition::new(
        "cloud_practitioner",
        "Cloud Practitioner",
        vec![make_group("networking", 60.0), make_group("storage", 40.0)],
        20,
        70.0,
    )
    .expect("valid composition");
    let registry: CompositionRegistry = [composition].into_iter().collect();
    let composition = registry.get("cloud_practitioner").expect("registered");

    let pool = Arc::new(QuestionPool::from_feed(snapshot_feed()));
    let sampler = StratifiedSampler::new(pool, SamplerOptions::default());
    let mut rng = DeterministicRng::new(8);
    let result = sampler
        .sample(
            &SamplingRequest::across_all(composition.total_questions),
            &mut rng,
        )
        .unwrap();
    assert_eq!(result.len(), composition.total_questions);
    assert_eq!(composition.passing_score(), 14);
}
