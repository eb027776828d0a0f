use vn_dialogue::{MapResolver, SceneAppearance};

const ROOT: &str = "dialogues/";

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn parses_speaker_portrait_and_background() {
    let resolver = MapResolver::new()
        .with("dialogues/ava_smile")
        .with("dialogues/classroom");
    let appearance = SceneAppearance::from_tags(
        &tags(&["character:Ava", "tachie:ava_smile", "background:classroom"]),
        &resolver,
        ROOT,
    );
    assert_eq!(appearance.speaker, "Ava");
    assert_eq!(appearance.portrait.unwrap().key(), "dialogues/ava_smile");
    assert_eq!(appearance.background.unwrap().key(), "dialogues/classroom");
}

#[test]
fn empty_tags_mean_everything_hidden() {
    let resolver = MapResolver::new();
    let appearance = SceneAppearance::from_tags(&[], &resolver, ROOT);
    assert_eq!(appearance, SceneAppearance::default());
}

#[test]
fn later_occurrence_of_a_key_wins() {
    let resolver = MapResolver::new();
    let appearance = SceneAppearance::from_tags(
        &tags(&["character:Alice", "character:Bob"]),
        &resolver,
        ROOT,
    );
    assert_eq!(appearance.speaker, "Bob");
}

#[test]
fn later_occurrence_wins_even_when_it_fails_to_resolve() {
    let resolver = MapResolver::new().with("dialogues/good");
    let appearance = SceneAppearance::from_tags(
        &tags(&["tachie:good", "tachie:missing"]),
        &resolver,
        ROOT,
    );
    assert!(appearance.portrait.is_none());
}

#[test]
fn keys_are_case_insensitive() {
    let resolver = MapResolver::new().with("dialogues/a1");
    let appearance = SceneAppearance::from_tags(
        &tags(&["Character:Ava", "TACHIE:a1"]),
        &resolver,
        ROOT,
    );
    assert_eq!(appearance.speaker, "Ava");
    assert!(appearance.portrait.is_some());
}

#[test]
fn speaker_value_is_taken_verbatim() {
    let resolver = MapResolver::new();
    let appearance = SceneAppearance::from_tags(&tags(&["character: Ava Lee"]), &resolver, ROOT);
    assert_eq!(appearance.speaker, " Ava Lee");
}

#[test]
fn malformed_and_unknown_tags_are_skipped() {
    let resolver = MapResolver::new();
    let appearance = SceneAppearance::from_tags(
        &tags(&["noseparator", "mood:pensive", "character:Eve"]),
        &resolver,
        ROOT,
    );
    assert_eq!(appearance.speaker, "Eve");
    assert!(appearance.portrait.is_none());
    assert!(appearance.background.is_none());
}

#[test]
fn unresolvable_assets_leave_elements_hidden() {
    let resolver = MapResolver::new();
    let appearance = SceneAppearance::from_tags(
        &tags(&["tachie:missing", "background:also_missing"]),
        &resolver,
        ROOT,
    );
    assert!(appearance.portrait.is_none());
    assert!(appearance.background.is_none());
}
