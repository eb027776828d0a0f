use vn_dialogue::{
    AssetHandle, DialogueConfig, DialoguePhase, DialoguePresenter, MapResolver, ScriptedLoader,
};

fn presenter() -> DialoguePresenter {
    DialoguePresenter::new(
        DialogueConfig::default(),
        Box::new(ScriptedLoader),
        Box::new(MapResolver::new()),
    )
}

fn two_lines() -> &'static str {
    r#"[
        {"type":"line","text":"Hi"},
        {"type":"line","text":"Bye"}
    ]"#
}

fn line_then_menu() -> &'static str {
    r#"[
        {"type":"line","text":"Pick"},
        {"type":"menu","options":[
            {"text":"Yes","target":2},
            {"text":"No","target":2}
        ]}
    ]"#
}

#[test]
fn font_override_reaches_the_stage_and_every_choice_entry() {
    let mut presenter = presenter().with_font(AssetHandle::new("fonts/main"));
    presenter.start_dialogue(line_then_menu(), None).unwrap();
    assert_eq!(
        presenter.stage().font.as_ref().map(AssetHandle::key),
        Some("fonts/main")
    );
    presenter.tap_advance().unwrap();
    assert_eq!(presenter.phase(), DialoguePhase::AwaitingChoice);
    let slots = presenter.choices().slots();
    assert_eq!(slots.len(), 2);
    for slot in slots {
        assert_eq!(slot.font.as_ref().map(AssetHandle::key), Some("fonts/main"));
    }
}

#[test]
fn without_an_override_entries_use_the_host_default_font() {
    let mut presenter = presenter();
    presenter.start_dialogue(line_then_menu(), None).unwrap();
    presenter.tap_advance().unwrap();
    assert!(presenter.stage().font.is_none());
    assert!(presenter.choices().slots().iter().all(|slot| slot.font.is_none()));
}

#[test]
fn autostart_runs_the_initial_script() {
    let mut presenter = presenter().autostart(two_lines()).unwrap();
    assert!(presenter.has_dialogue());
    assert_eq!(presenter.phase(), DialoguePhase::Typing);
    assert_eq!(presenter.stage().line, "Hi");
    presenter.tap_skip_all();
    presenter.tap_skip_all();
    assert!(!presenter.has_dialogue());
}

#[test]
fn autostart_rejects_an_invalid_script() {
    assert!(presenter().autostart("not json").is_err());
}

#[test]
fn toggling_auto_swaps_the_label_and_pulses_it() {
    let mut presenter = presenter();
    assert_eq!(presenter.stage().auto_label, "Auto: Off");
    presenter.tap_toggle_auto().unwrap();
    assert_eq!(presenter.stage().auto_label, "Auto: On");
    assert_eq!(presenter.stage().auto_label_alpha, 0.0);
    presenter.tick(0.25).unwrap();
    assert!((presenter.stage().auto_label_alpha - 1.0).abs() < 1e-5);
    presenter.tap_toggle_auto().unwrap();
    assert_eq!(presenter.stage().auto_label, "Auto: Off");
    assert_eq!(presenter.stage().auto_label_alpha, 0.0);
}
