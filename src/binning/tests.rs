use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{bin_cues, bin_track, BinDuration, ResultOutcome, SkipReason};
use crate::error::SubtitleError;
use crate::timestamp::Timestamp;
use crate::types::{Cue, RecognitionAlternative, RecognitionResult, Word};

fn word(text: &str, start_ms: u64, end_ms: u64) -> Word {
    Word::new(
        text,
        Timestamp::from_millis(start_ms),
        Timestamp::from_millis(end_ms),
    )
}

fn result(words: Vec<Word>) -> RecognitionResult {
    RecognitionResult::from_words(words)
}

fn cue(index: usize, start_ms: u64, end_ms: u64, text: &str) -> Cue {
    Cue {
        index,
        start: Timestamp::from_millis(start_ms),
        end: Timestamp::from_millis(end_ms),
        text: text.to_string(),
    }
}

#[test]
fn empty_input_yields_no_cues() {
    assert!(bin_cues(&[], 3.0).expect("valid bin").is_empty());
}

#[test]
fn single_word_becomes_one_cue() {
    let cues = bin_cues(&[result(vec![word("hi", 0, 500)])], 3.0).expect("valid bin");
    assert_eq!(cues, vec![cue(1, 0, 500, "hi")]);
}

#[test]
fn bin_split_closes_at_previous_word_end() {
    let words = vec![
        word("a", 0, 0),
        word("b", 500, 1_000),
        word("c", 1_500, 2_000),
        word("d", 3_500, 4_000),
    ];
    let cues = bin_cues(&[result(words)], 3.0).expect("valid bin");
    assert_eq!(
        cues,
        vec![cue(1, 0, 2_000, "a b c"), cue(2, 3_500, 4_000, "d")]
    );
}

#[test]
fn end_exactly_on_bin_boundary_splits() {
    let words = vec![word("a", 0, 1_000), word("b", 2_000, 3_000)];
    let cues = bin_cues(&[result(words)], 3.0).expect("valid bin");
    assert_eq!(cues, vec![cue(1, 0, 1_000, "a"), cue(2, 2_000, 3_000, "b")]);
}

#[test]
fn first_word_inside_first_second_snaps_to_zero() {
    let cues = bin_cues(&[result(vec![word("hi", 700, 900)])], 3.0).expect("valid bin");
    assert_eq!(cues[0].start, Timestamp::ZERO);
    assert_eq!(cues[0].end, Timestamp::from_millis(900));
}

#[test]
fn zero_snap_moves_the_bin_end_too() {
    // Bin runs 0..3s, so a word ending at 3.2s splits even though 0.9 + 3 > 3.2.
    let words = vec![word("a", 900, 1_000), word("b", 2_000, 3_200)];
    let cues = bin_cues(&[result(words)], 3.0).expect("valid bin");
    assert_eq!(cues, vec![cue(1, 0, 1_000, "a"), cue(2, 2_000, 3_200, "b")]);
}

#[test]
fn start_past_first_second_keeps_its_remainder() {
    let words = vec![word("a", 1_250, 1_500), word("b", 2_000, 4_100)];
    let cues = bin_cues(&[result(words)], 3.0).expect("valid bin");
    // 4.1s < 1.25s + 3s, so the remainder is carried into the bin end.
    assert_eq!(cues, vec![cue(1, 1_250, 4_100, "a b")]);
}

#[test]
fn only_whole_seconds_decide_the_zero_snap_of_later_results() {
    let results = vec![
        result(vec![word("a", 5_000, 5_500)]),
        result(vec![word("b", 400, 800)]),
    ];
    let cues = bin_cues(&results, 3.0).expect("valid bin");
    assert_eq!(cues[1].start, Timestamp::ZERO);
}

#[test]
fn tail_cue_may_exceed_bin() {
    let words = vec![word("a", 1_000, 1_200), word("long", 1_300, 3_900)];
    let cues = bin_cues(&[result(words)], 3.0).expect("valid bin");
    assert_eq!(cues, vec![cue(1, 1_000, 3_900, "a long")]);

    let words = vec![word("a", 1_000, 1_200), word("longer", 1_300, 9_000)];
    let cues = bin_cues(&[result(words)], 3.0).expect("valid bin");
    assert_eq!(cues, vec![cue(1, 1_000, 1_200, "a"), cue(2, 1_300, 9_000, "longer")]);
}

#[test]
fn cues_never_span_results_and_indices_continue() {
    let results = vec![
        result(vec![word("one", 1_000, 1_500), word("two", 1_600, 2_000)]),
        result(vec![word("three", 2_100, 2_400)]),
        result(vec![word("four", 6_000, 6_500), word("five", 9_000, 9_400)]),
    ];
    let cues = bin_cues(&results, 3.0).expect("valid bin");
    assert_eq!(
        cues,
        vec![
            cue(1, 1_000, 2_000, "one two"),
            cue(2, 2_100, 2_400, "three"),
            cue(3, 6_000, 6_500, "four"),
            cue(4, 9_000, 9_400, "five"),
        ]
    );
}

#[test]
fn empty_results_are_skipped_without_breaking_numbering() {
    let results = vec![
        result(vec![word("a", 1_000, 1_100)]),
        RecognitionResult::default(),
        result(Vec::new()),
        result(vec![word("b", 5_000, 5_100)]),
    ];
    let track = bin_track(&results, BinDuration::default());
    assert_eq!(
        track.cues,
        vec![cue(1, 1_000, 1_100, "a"), cue(2, 5_000, 5_100, "b")]
    );
    assert_eq!(
        track.outcomes,
        vec![
            ResultOutcome::Binned {
                cue_count: 1,
                word_count: 1
            },
            ResultOutcome::Skipped(SkipReason::NoAlternatives),
            ResultOutcome::Skipped(SkipReason::EmptyWordList),
            ResultOutcome::Binned {
                cue_count: 1,
                word_count: 1
            },
        ]
    );
}

#[test]
fn only_best_alternative_is_used() {
    let results = vec![RecognitionResult {
        alternatives: vec![
            RecognitionAlternative::from_words(vec![word("best", 1_000, 1_500)]),
            RecognitionAlternative::from_words(vec![word("worse", 1_000, 1_500)]),
        ],
    }];
    let cues = bin_cues(&results, 3.0).expect("valid bin");
    assert_eq!(cues, vec![cue(1, 1_000, 1_500, "best")]);
}

#[test]
fn empty_best_alternative_skips_even_if_others_have_words() {
    let results = vec![RecognitionResult {
        alternatives: vec![
            RecognitionAlternative::default(),
            RecognitionAlternative::from_words(vec![word("x", 1_000, 1_500)]),
        ],
    }];
    let track = bin_track(&results, BinDuration::default());
    assert!(track.cues.is_empty());
    assert_eq!(
        track.outcomes,
        vec![ResultOutcome::Skipped(SkipReason::EmptyWordList)]
    );
}

#[test]
fn non_monotonic_words_never_yield_inverted_cues() {
    let words = vec![word("late", 5_000, 5_200), word("early", 1_000, 1_100)];
    let cues = bin_cues(&[result(words)], 3.0).expect("valid bin");
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "late early");
    assert_eq!(cues[0].start, Timestamp::from_millis(5_000));
    assert_eq!(cues[0].end, Timestamp::from_millis(5_000));
}

#[test]
fn fractional_bin_seconds_are_respected() {
    let words = vec![
        word("a", 1_000, 1_200),
        word("b", 1_300, 1_490),
        word("c", 1_500, 1_600),
    ];
    let cues = bin_cues(&[result(words)], 0.5).expect("valid bin");
    assert_eq!(cues, vec![cue(1, 1_000, 1_490, "a b"), cue(2, 1_500, 1_600, "c")]);
}

#[test]
fn microsecond_remainders_are_compared_exactly() {
    let words = vec![
        Word::new(
            "a",
            Timestamp::from_micros(1_000_001),
            Timestamp::from_micros(1_000_002),
        ),
        Word::new(
            "b",
            Timestamp::from_micros(2_000_000),
            Timestamp::from_micros(4_000_000),
        ),
        Word::new(
            "c",
            Timestamp::from_micros(4_000_000),
            Timestamp::from_micros(4_000_001),
        ),
    ];
    let cues = bin_cues(&[result(words)], 3.0).expect("valid bin");
    // bin end is 4.000001s: "b" fits, "c" lands exactly on it and splits.
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text, "a b");
    assert_eq!(cues[1].text, "c");
}

#[test]
fn invalid_bin_seconds_fail_before_processing() {
    let results = vec![result(vec![word("hi", 0, 500)])];
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-9] {
        let err = bin_cues(&results, bad).expect_err("bin must be rejected");
        assert!(
            matches!(err, SubtitleError::InvalidArgument { .. }),
            "unexpected error for {bad}: {err}"
        );
    }
}

#[test]
fn huge_bin_saturates_and_keeps_result_in_one_cue() {
    let bin = BinDuration::from_secs_f64(1e20).expect("huge bin is valid");
    assert_eq!(bin.as_timestamp(), Timestamp::from_micros(u64::MAX));

    let words = vec![word("a", 1_000, 1_500), word("b", 90_000, 99_000)];
    let cues = bin_cues(&[result(words)], 1e20).expect("huge bin is valid");
    assert_eq!(cues, vec![cue(1, 1_000, 99_000, "a b")]);
}

#[test]
fn default_bin_is_three_seconds() {
    assert_eq!(
        BinDuration::default(),
        BinDuration::from_secs_f64(super::DEFAULT_BIN_SECONDS).expect("valid bin")
    );
}

fn random_results(rng: &mut StdRng) -> Vec<RecognitionResult> {
    let mut cursor_ms = rng.gen_range(0..2_000u64);
    let mut results = Vec::new();
    for result_idx in 0..rng.gen_range(0..8usize) {
        if rng.gen_bool(0.1) {
            results.push(RecognitionResult::default());
            continue;
        }
        // Later results start past the first second so the zero snap
        // cannot reorder starts across results.
        if result_idx > 0 {
            cursor_ms = cursor_ms.max(1_000);
        }
        let mut words = Vec::new();
        for word_idx in 0..rng.gen_range(0..20usize) {
            let start = cursor_ms + rng.gen_range(0..800u64);
            let end = start + rng.gen_range(0..1_500u64);
            cursor_ms = end;
            words.push(word(&format!("w{result_idx}_{word_idx}"), start, end));
        }
        results.push(result(words));
    }
    results
}

#[test]
fn randomized_tracks_hold_binning_properties() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let results = random_results(&mut rng);
        let bin_seconds = rng.gen_range(0.25..6.0f64);

        let cues = bin_cues(&results, bin_seconds).expect("valid bin");
        let again = bin_cues(&results, bin_seconds).expect("valid bin");
        assert_eq!(cues, again, "binning must be deterministic");

        for (position, cue) in cues.iter().enumerate() {
            assert_eq!(cue.index, position + 1);
            assert!(cue.start <= cue.end);
        }
        for pair in cues.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }

        let expected_words: Vec<&str> = results
            .iter()
            .filter_map(|r| r.best())
            .flat_map(|alt| alt.words.iter().map(|w| w.text.as_str()))
            .collect();
        let emitted_words: Vec<&str> = cues
            .iter()
            .flat_map(|cue| cue.text.split(' '))
            .collect();
        assert_eq!(emitted_words, expected_words);
    }
}
