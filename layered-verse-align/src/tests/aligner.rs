use crate::{ElisionTable, WordAligner};
use layered_verse::{PartOfSpeech, Token, TokenTags, Verse, VerseRef};

fn verse(words: &[(&str, &str)]) -> Verse {
    let tokens = words
        .iter()
        .enumerate()
        .map(|(i, (surface, lemma))| Token::new(i, *surface, TokenTags::new(*lemma, PartOfSpeech::Other)))
        .collect();
    Verse::new(VerseRef::new("JHN", 1, 3), tokens)
}

#[test]
fn test_elided_form_matches_full_lemma() {
    let target = verse(&[("πάντα", "πᾶς"), ("δι᾽", ""), ("αὐτοῦ", "αὐτός"), ("ἐγένετο", "γίνομαι")]);
    let reference = verse(&[("πάντα", "πᾶς"), ("διά", "διά"), ("αὐτοῦ", "αὐτός"), ("ἐγένετο", "γίνομαι")]);

    let record = WordAligner::default().align(&target, &reference);
    assert!(record.is_bijection());
    assert_eq!(record.completeness(), 1.0);
}

#[test]
fn test_elided_lemma_is_expanded() {
    let aligner = WordAligner::default();
    let token = Token::new(0, "ἀπ᾽", TokenTags::new("ἀπ᾽", PartOfSpeech::Preposition));
    assert_eq!(aligner.alignment_key(&token), "απο");

    let plain = Token::new(0, "δέ", TokenTags::new("δέ", PartOfSpeech::Conjunction));
    assert_eq!(aligner.alignment_key(&plain), "δε");
}

#[test]
fn test_without_elision_table_elided_form_is_a_variant() {
    let target = verse(&[("δι᾽", ""), ("αὐτοῦ", "αὐτός")]);
    let reference = verse(&[("διά", "διά"), ("αὐτοῦ", "αὐτός")]);

    let record = WordAligner::new(ElisionTable::empty()).align(&target, &reference);
    assert_eq!(record.map(), &[None, Some(1)]);
    assert_eq!(record.completeness(), 0.5);
}

#[test]
fn test_diacritics_ignored() {
    let target = verse(&[("θεος", "θεος"), ("ην", "ειμι")]);
    let reference = verse(&[("θεὸς", "θεός"), ("ἦν", "εἰμί")]);
    let record = WordAligner::default().align(&target, &reference);
    assert!(record.is_bijection());
}

#[test]
fn test_variants_stay_unmatched_and_order_preserved() {
    let target = verse(&[
        ("καὶ", "καί"),
        ("ὁ", "ὁ"),
        ("λόγος", "λόγος"),
        ("σὰρξ", "σάρξ"),
        ("ἐγένετο", "γίνομαι"),
    ]);
    let reference = verse(&[
        ("καὶ", "καί"),
        ("λόγος", "λόγος"),
        ("ἐγένετο", "γίνομαι"),
        ("σὰρξ", "σάρξ"),
    ]);
    let record = WordAligner::default().align(&target, &reference);
    assert!(record.is_monotonic());
    assert_eq!(record.matched_count(), 3);
    assert_eq!(record.reference_of(0), Some(0));
    assert_eq!(record.reference_of(1), None);
    assert_eq!(record.reference_of(2), Some(1));
}

#[test]
fn test_equal_length_candidates_prefer_least_displacement() {
    let target = verse(&[
        ("καὶ", "καί"),
        ("ὁ", "ὁ"),
        ("λόγος", "λόγος"),
        ("σὰρξ", "σάρξ"),
        ("ἐγένετο", "γίνομαι"),
    ]);
    let reference = verse(&[
        ("καὶ", "καί"),
        ("λόγος", "λόγος"),
        ("ἐγένετο", "γίνομαι"),
        ("σὰρξ", "σάρξ"),
    ]);
    let record = WordAligner::default().align(&target, &reference);

    let rendered = target
        .tokens()
        .iter()
        .map(|token| {
            let matched = record
                .reference_of(token.position())
                .and_then(|r| reference.token(r))
                .map_or("-", |r| r.surface());
            format!("{} -> {}", token.surface(), matched)
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r###"
    καὶ -> καὶ
    ὁ -> -
    λόγος -> λόγος
    σὰρξ -> σὰρξ
    ἐγένετο -> -
    "###);
    assert_eq!(record.displacement(), 1);
}
