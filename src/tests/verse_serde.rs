use crate::{PartOfSpeech, Token, TokenTags, Verse, VerseRef};

fn verse() -> Verse {
    Verse::new(
        VerseRef::new("JHN", 1, 1),
        vec![
            Token::new(0, "ὁ", TokenTags::new("ὁ", PartOfSpeech::Article)),
            Token::new(1, "λόγος", TokenTags::new("λόγος", PartOfSpeech::Noun)),
            Token::new(2, "ἦν", TokenTags::new("εἰμί", PartOfSpeech::Verb)),
        ],
    )
}

#[test]
fn test_deserialize_restamps_positions() {
    let mut value = serde_json::to_value(verse()).unwrap();
    let tokens = value["tokens"].as_array_mut().unwrap();
    for (token, stale) in tokens.iter_mut().zip([7, 3, 12]) {
        token["position"] = serde_json::json!(stale);
    }

    let restored: Verse = serde_json::from_value(value).unwrap();
    let positions: Vec<usize> = restored.tokens().iter().map(|t| t.position()).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert_eq!(restored, verse());
}

#[test]
fn test_serialize_round_trip() {
    let json = serde_json::to_string(&verse()).unwrap();
    let restored: Verse = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.token(1).map(|t| t.surface()), Some("λόγος"));
    assert_eq!(restored.reference(), &VerseRef::new("JHN", 1, 1));
}
