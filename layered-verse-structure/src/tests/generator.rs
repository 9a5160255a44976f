use crate::{ClauseType, HeuristicGenerator, RuleId};
use layered_verse::{
    Case, Mood, NodeKind, PartOfSpeech, StructureSource, Token, TokenTags, Verse, VerseRef,
};

fn word(surface: &str, lemma: &str, pos: PartOfSpeech) -> Token {
    Token::new(0, surface, TokenTags::new(lemma, pos)).with_after(" ")
}

fn nominal(surface: &str, pos: PartOfSpeech, case: Case) -> Token {
    Token::new(0, surface, TokenTags::new(surface, pos).with_case(case)).with_after(" ")
}

fn finite(surface: &str, lemma: &str) -> Token {
    Token::new(
        0,
        surface,
        TokenTags::new(lemma, PartOfSpeech::Verb).with_mood(Mood::Indicative),
    )
    .with_after(" ")
}

fn john_1_1() -> Verse {
    use PartOfSpeech::*;
    Verse::new(
        VerseRef::new("JHN", 1, 1),
        vec![
            word("εν", "εν", Preposition),
            nominal("αρχη", Noun, Case::Dative),
            finite("ην", "ειμι"),
            nominal("ο", Article, Case::Nominative),
            nominal("λογοσ", Noun, Case::Nominative).with_after(", "),
            word("και", "και", Conjunction),
            nominal("ο", Article, Case::Nominative),
            nominal("λογοσ", Noun, Case::Nominative),
            finite("ην", "ειμι"),
            word("προσ", "προσ", Preposition),
            nominal("τον", Article, Case::Accusative),
            nominal("θεον", Noun, Case::Accusative).with_after("."),
        ],
    )
}

#[test]
fn test_john_1_1() {
    let verse = john_1_1();
    let structure = HeuristicGenerator::default().generate(&verse);

    insta::assert_snapshot!(verse.display().with_structure(&structure), @r###"
    εν  αρχη  ην  ο  λογοσ,  και  ο  λογοσ  ην  προσ  τον  θεον.
    ╰─────────────────────╯clause(main) 0.95
    ╰──────╯phrase(PP) 0.90
    ╰──────╯wg(PrepNp) 0.90
              ╰╯phrase(VP) 0.85
                  ╰───────╯phrase(NP) 0.85 Subj=0.75
                  ╰───────╯wg(DetNP) 0.90
                             ╰─────────────────────────────────╯clause(coordinate) 0.90
                                  ╰──────╯phrase(NP) 0.85 Subj=0.75
                                  ╰──────╯wg(DetNP) 0.90
                                            ╰╯phrase(VP) 0.85
                                                ╰──────────────╯phrase(PP) 0.90 Cmpl=0.80
                                                ╰──────────────╯wg(PrepNp) 0.90
    "###);
}

#[test]
fn test_clauses_only() {
    let verse = john_1_1();
    let structure = HeuristicGenerator::default().generate(&verse);

    insta::assert_snapshot!(verse.display().with_kind(&structure, NodeKind::Clause), @r###"
    εν  αρχη  ην  ο  λογοσ,  και  ο  λογοσ  ην  προσ  τον  θεον.
    ╰─────────────────────╯clause(main) 0.95
                             ╰─────────────────────────────────╯clause(coordinate) 0.90
    "###);
}

#[test]
fn test_subject_before_verb_object_after() {
    use PartOfSpeech::*;
    let verse = Verse::new(
        VerseRef::new("JHN", 3, 16),
        vec![
            nominal("ο", Article, Case::Nominative),
            nominal("θεοσ", Noun, Case::Nominative),
            finite("ηγαπησεν", "αγαπαω"),
            nominal("τον", Article, Case::Accusative),
            nominal("κοσμον", Noun, Case::Accusative).with_after("."),
        ],
    );
    let structure = HeuristicGenerator::default().generate(&verse);

    insta::assert_snapshot!(verse.display().with_structure(&structure), @r###"
    ο  θεοσ  ηγαπησεν  τον  κοσμον.
    ╰─────────────────────────────╯clause(main) 0.95
    ╰─────╯phrase(NP) 0.85 Subj=0.75
    ╰─────╯wg(DetNP) 0.90
             ╰──────╯phrase(VP) 0.85
                       ╰──────────╯phrase(NP) 0.85 Objc=0.75
                       ╰──────────╯wg(DetNP) 0.90
    "###);

    let relations: Vec<(String, f64)> = structure
        .of_kind(NodeKind::Phrase)
        .filter_map(|p| p.relation.as_ref())
        .map(|r| (r.value.clone(), r.confidence))
        .collect();
    assert_eq!(
        relations,
        vec![("Subj".to_string(), 0.75), ("Objc".to_string(), 0.75)]
    );
}

#[test]
fn test_leading_subordinator_yields_empty_main_and_content_clause() {
    use PartOfSpeech::*;
    let verse = Verse::new(
        VerseRef::new("JHN", 3, 17),
        vec![
            word("οτι", "ὅτι", Conjunction),
            finite("ηλθεν", "ερχομαι"),
            nominal("φωσ", Noun, Case::Nominative).with_after("."),
        ],
    );
    let generator = HeuristicGenerator::default();

    let segments = generator.segment(&verse);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].clause_type, ClauseType::Main);
    assert_eq!(segments[0].span, None);
    assert_eq!(segments[0].confidence, 0.95);
    assert_eq!(segments[1].clause_type, ClauseType::Content);
    assert_eq!(segments[1].trigger, RuleId::Subordinator);
    assert_eq!(segments[1].span.map(|s| (s.start, s.end)), Some((0, 2)));
    assert_eq!(segments[1].confidence, 0.95);

    // the empty leading clause is not materialized
    let structure = generator.generate(&verse);
    let clauses: Vec<_> = structure.of_kind(NodeKind::Clause).collect();
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].clause_type.as_deref(), Some("content"));
}

#[test]
fn test_article_noun_single_det_np() {
    use PartOfSpeech::*;
    let verse = Verse::new(
        VerseRef::new("JHN", 1, 1),
        vec![
            nominal("ο", Article, Case::Nominative),
            nominal("λογοσ", Noun, Case::Nominative),
        ],
    );
    let structure = HeuristicGenerator::default().generate(&verse);
    let groups: Vec<_> = structure.of_kind(NodeKind::WordGroup).collect();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].rule.as_deref(), Some("DetNP"));
    assert_eq!((groups[0].span.start, groups[0].span.end), (0, 1));
    assert_eq!(groups[0].confidence, 0.90);
}

#[test]
fn test_generated_nodes_nest_within_parents() {
    let verse = john_1_1();
    let structure = HeuristicGenerator::default().generate(&verse);
    assert!(!structure.is_empty());

    for (index, node) in structure.nodes().iter().enumerate() {
        assert_eq!(node.source, StructureSource::Generated);
        assert!(node.span.end < verse.len());
        let depth = structure.depth(index).unwrap();
        assert!(depth <= 2);
        match node.kind {
            NodeKind::Clause => assert_eq!(node.parent, None),
            NodeKind::Phrase | NodeKind::WordGroup => {
                let parent = structure.get(node.parent.unwrap()).unwrap();
                assert!(parent.span.contains_span(&node.span));
            }
        }
    }
}

#[test]
fn test_clauses_partition_the_verse() {
    let verse = john_1_1();
    let structure = HeuristicGenerator::default().generate(&verse);
    let mut covered = Vec::new();
    for clause in structure.of_kind(NodeKind::Clause) {
        covered.extend(clause.span.positions());
    }
    assert_eq!(covered, (0..verse.len()).collect::<Vec<_>>());
}

#[test]
fn test_generation_is_deterministic() {
    let verse = john_1_1();
    let generator = HeuristicGenerator::default();
    assert_eq!(generator.generate(&verse), generator.generate(&verse));
}

#[test]
fn test_confidence_override_flows_through() {
    use crate::{ClauseLexicon, ConfidenceTable};

    let table = ConfidenceTable::standard().with_override(RuleId::DetNp, 0.5).unwrap();
    let generator = HeuristicGenerator::new(ClauseLexicon::standard(), table).unwrap();
    let structure = generator.generate(&john_1_1());
    assert!(structure
        .of_kind(NodeKind::WordGroup)
        .filter(|g| g.rule.as_deref() == Some("DetNP"))
        .all(|g| g.confidence == 0.5));
}

fn phrase_relations(verse: &Verse) -> Vec<((usize, usize), Option<String>)> {
    HeuristicGenerator::default()
        .generate(verse)
        .of_kind(NodeKind::Phrase)
        .map(|p| ((p.span.start, p.span.end), p.relation.as_ref().map(|r| r.value.clone())))
        .collect()
}

#[test]
fn test_genitive_attaches_only_to_adjacent_noun_phrase() {
    use PartOfSpeech::*;
    let adjacent = Verse::new(
        VerseRef::new("MRK", 1, 1),
        vec![
            nominal("ο", Article, Case::Nominative),
            nominal("λογοσ", Noun, Case::Nominative),
            nominal("του", Article, Case::Genitive),
            nominal("θεου", Noun, Case::Genitive),
            finite("ην", "ειμι"),
        ],
    );
    assert_eq!(
        phrase_relations(&adjacent),
        vec![
            ((0, 1), Some("Subj".to_string())),
            ((2, 3), Some("Attr".to_string())),
            ((4, 4), None),
        ]
    );

    // καί breaks the phrase run, so the genitive no longer follows a noun phrase
    let coordinated = Verse::new(
        VerseRef::new("MRK", 1, 2),
        vec![
            nominal("ο", Article, Case::Nominative),
            nominal("λογοσ", Noun, Case::Nominative),
            word("και", "και", Conjunction),
            nominal("του", Article, Case::Genitive),
            nominal("θεου", Noun, Case::Genitive),
            finite("ην", "ειμι"),
        ],
    );
    assert_eq!(
        phrase_relations(&coordinated),
        vec![
            ((0, 1), Some("Subj".to_string())),
            ((3, 4), None),
            ((5, 5), None),
        ]
    );
}
