use crate::{PartOfSpeech, RawToken, RawVerse, TokenTags, VerseRef};

#[test]
fn test_from_text_attaches_punctuation() {
    let raw = RawVerse::from_text(
        VerseRef::new("JHN", 1, 1),
        "Ἐν ἀρχῇ ἦν ὁ λόγος, καὶ ὁ λόγος ἦν πρὸς τὸν θεόν.",
    );
    let surfaces: Vec<&str> = raw.tokens.iter().map(|t| t.surface.as_str()).collect();
    assert_eq!(
        surfaces,
        vec!["Ἐν", "ἀρχῇ", "ἦν", "ὁ", "λόγος", "καὶ", "ὁ", "λόγος", "ἦν", "πρὸς", "τὸν", "θεόν"]
    );
    assert_eq!(raw.tokens[4].after, ", ");
    assert_eq!(raw.tokens[11].after, ".");
    assert_eq!(raw.untagged_positions().len(), 12);
}

#[test]
fn test_from_text_keeps_elision_on_word() {
    let raw = RawVerse::from_text(VerseRef::new("JHN", 1, 3), "πάντα δι᾽ αὐτοῦ ἐγένετο");
    let surfaces: Vec<&str> = raw.tokens.iter().map(|t| t.surface.as_str()).collect();
    assert_eq!(surfaces, vec!["πάντα", "δι᾽", "αὐτοῦ", "ἐγένετο"]);

    let raw = RawVerse::from_text(VerseRef::new("MRK", 1, 8), "ἐγὼ ἐβάπτισα, αὐτὸς δ’ ἐν");
    assert_eq!(raw.tokens[3].surface, "δ’");
    assert_eq!(raw.tokens[3].after, " ");
}

#[test]
fn test_from_text_drops_leading_punctuation() {
    let raw = RawVerse::from_text(VerseRef::new("JHN", 1, 1), "— καὶ");
    assert_eq!(raw.tokens.len(), 1);
    assert_eq!(raw.tokens[0].surface, "καὶ");
}

#[test]
fn test_into_verse_fills_only_untagged() {
    let raw = RawVerse::new(
        VerseRef::new("JHN", 1, 1),
        vec![
            RawToken::new("ὁ").with_tags(TokenTags::new("ὁ", PartOfSpeech::Article)),
            RawToken::new("λόγος"),
        ],
    );
    assert_eq!(raw.untagged_positions(), vec![1]);

    let mut asked = Vec::new();
    let verse = raw.into_verse(|position, token| {
        asked.push(position);
        TokenTags::new(token.surface.clone(), PartOfSpeech::Noun)
    });
    assert_eq!(asked, vec![1]);
    assert_eq!(verse.len(), 2);
    assert_eq!(verse.token(0).map(|t| t.pos()), Some(PartOfSpeech::Article));
    assert_eq!(verse.token(1).map(|t| t.pos()), Some(PartOfSpeech::Noun));
    assert_eq!(verse.token(1).map(|t| t.position()), Some(1));
}
