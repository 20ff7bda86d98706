use std::fs;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;

use super::event_loop::{EventLoopState, handle_key_event};
use super::*;
use crate::catalog::{Album, Song};
use crate::media::fake::{Call, FakeMedia};

const CATALOG: &str = r#"
[[album]]
slug = "shared"
title = "From The Catalog"
artist = "Someone"

[[album.songs]]
title = "One"
audio_src = "one.mp3"
"#;

fn settings_with(catalog: Option<PathBuf>, music_dir: Option<PathBuf>) -> Settings {
    let mut settings = Settings::default();
    settings.library.catalog_path = catalog;
    settings.library.music_dir = music_dir;
    settings
}

#[test]
fn directory_argument_is_scanned_as_one_album() {
    let dir = tempdir().unwrap();
    let album_dir = dir.path().join("Night Drive");
    fs::create_dir_all(&album_dir).unwrap();
    fs::write(album_dir.join("a.mp3"), b"x").unwrap();

    let settings = settings_with(None, None);
    let (catalog, slug) = resolve_target(album_dir.to_str(), &settings);
    assert_eq!(slug, "night-drive");
    assert_eq!(catalog.len(), 1);
}

#[test]
fn catalog_file_wins_over_scanned_album_with_same_slug() {
    let dir = tempdir().unwrap();
    let catalog_path = dir.path().join("albums.toml");
    fs::write(&catalog_path, CATALOG).unwrap();
    let music = dir.path().join("music");
    for name in ["shared", "extra"] {
        fs::create_dir_all(music.join(name)).unwrap();
        fs::write(music.join(name).join("t.flac"), b"x").unwrap();
    }

    let settings = settings_with(Some(catalog_path), Some(music));
    let (catalog, slug) = resolve_target(None, &settings);
    assert_eq!(slug, "shared");
    assert_eq!(catalog.slugs(), vec!["shared", "extra"]);
    assert_eq!(catalog.find("shared").unwrap().title, "From The Catalog");
}

#[test]
fn slug_argument_is_passed_through_even_when_unknown() {
    let dir = tempdir().unwrap();
    let settings = settings_with(Some(dir.path().join("missing.toml")), None);
    let (catalog, slug) = resolve_target(Some("nope"), &settings);
    assert!(catalog.is_empty());
    assert_eq!(slug, "nope");
}

fn controller(fake: &FakeMedia) -> AlbumController<FakeMedia> {
    let song = |t: &str| Song {
        title: t.into(),
        audio_src: PathBuf::from(format!("/m/{t}.mp3")),
        duration: 100.0,
    };
    let album = Album {
        slug: "abc".into(),
        title: "ABC".into(),
        artist: "X".into(),
        release_info: String::new(),
        cover: None,
        songs: vec![song("A"), song("B"), song("C")],
    };
    let ctl = AlbumController::new(album, fake.clone(), 80).unwrap();
    fake.clear_calls();
    ctl
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn enter_activates_selected_row() {
    let fake = FakeMedia::new();
    let mut ctl = controller(&fake);
    let mut app = App::new(3);
    let mut state = EventLoopState::default();
    let settings = Settings::default();

    handle_key_event(press(KeyCode::Char('j')), &settings, &mut ctl, &mut app, &mut state);
    handle_key_event(press(KeyCode::Char('j')), &settings, &mut ctl, &mut app, &mut state);
    assert!(!app.follow_playback);
    handle_key_event(press(KeyCode::Enter), &settings, &mut ctl, &mut app, &mut state);

    assert_eq!(ctl.current_index(), 2);
    assert!(ctl.is_playing());
    assert!(app.follow_playback);
    assert_eq!(
        fake.calls(),
        vec![Call::SetSource(PathBuf::from("/m/C.mp3")), Call::Play]
    );
}

#[test]
fn gg_needs_two_presses_and_other_keys_cancel_it() {
    let fake = FakeMedia::new();
    let mut ctl = controller(&fake);
    let mut app = App::new(3);
    let mut state = EventLoopState::default();
    let settings = Settings::default();

    handle_key_event(press(KeyCode::Char('G')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(app.selected, 2);
    handle_key_event(press(KeyCode::Char('g')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(app.selected, 2);
    handle_key_event(press(KeyCode::Char('k')), &settings, &mut ctl, &mut app, &mut state);
    handle_key_event(press(KeyCode::Char('g')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(app.selected, 1);
    handle_key_event(press(KeyCode::Char('g')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(app.selected, 0);
}

#[test]
fn transport_keys_drive_the_controller() {
    let fake = FakeMedia::new();
    let mut ctl = controller(&fake);
    let mut app = App::new(3);
    let mut state = EventLoopState::default();
    let settings = Settings::default();

    handle_key_event(press(KeyCode::Char('l')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(ctl.current_index(), 1);
    handle_key_event(press(KeyCode::Char('h')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(ctl.current_index(), 0);

    assert!(ctl.is_playing());
    handle_key_event(press(KeyCode::Char(' ')), &settings, &mut ctl, &mut app, &mut state);
    assert!(!ctl.is_playing());
    handle_key_event(press(KeyCode::Char('p')), &settings, &mut ctl, &mut app, &mut state);
    assert!(ctl.is_playing());

    handle_key_event(press(KeyCode::Char('5')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(ctl.position(), 50.0);

    handle_key_event(press(KeyCode::Char('-')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(ctl.volume(), 75);
    handle_key_event(press(KeyCode::Char('+')), &settings, &mut ctl, &mut app, &mut state);
    assert_eq!(ctl.volume(), 80);
}

#[test]
fn quit_keys_request_shutdown() {
    let fake = FakeMedia::new();
    let mut ctl = controller(&fake);
    let mut app = App::new(3);
    let mut state = EventLoopState::default();
    let settings = Settings::default();

    assert!(!handle_key_event(press(KeyCode::Char('j')), &settings, &mut ctl, &mut app, &mut state));
    assert!(handle_key_event(press(KeyCode::Char('q')), &settings, &mut ctl, &mut app, &mut state));
    assert!(handle_key_event(press(KeyCode::Esc), &settings, &mut ctl, &mut app, &mut state));
}
