use std::path::{Path, PathBuf};

use super::*;

const CATALOG: &str = r#"
[[album]]
slug = "the-colors"
title = "The Colors"
artist = "Pablo Picasso"
release_info = "1909 Spanish Records"
cover = "covers/colors.png"

[[album.songs]]
title = "Blue"
audio_src = "audio/blue.mp3"
duration = 161.71

[[album.songs]]
title = "Green"
audio_src = "/abs/green.mp3"
duration = 103.96

[[album]]
slug = "the-telephone"
title = "The Telephone"
artist = "Guglielmo Marconi"

[[album.songs]]
title = "Ring"
audio_src = "ring.mp3"
"#;

#[test]
fn slugify_collapses_separators() {
    assert_eq!(slugify("Kind of Blue"), "kind-of-blue");
    assert_eq!(slugify("  AC/DC -- Back in Black!! "), "ac-dc-back-in-black");
    assert_eq!(slugify("___"), FALLBACK_SLUG);
}

#[test]
fn slugify_keeps_non_ascii_letters() {
    assert_eq!(slugify("Кино - Группа крови"), "кино-группа-крови");
    assert_eq!(slugify("東京事変"), "東京事変");
    assert_eq!(slugify("Björk: Début"), "björk-début");
}

#[test]
fn invalid_durations_become_unknown() {
    let text = r#"
[[album]]
slug = "odd"
title = "Odd"
artist = "A"

[[album.songs]]
title = "Backwards"
audio_src = "a.mp3"
duration = -5.0

[[album.songs]]
title = "Forever"
audio_src = "b.mp3"
duration = 1e20

[[album.songs]]
title = "Endless"
audio_src = "c.mp3"
duration = inf

[[album.songs]]
title = "Fine"
audio_src = "d.mp3"
duration = 12.5
"#;
    let catalog = Catalog::from_toml_str(text, Path::new("/music")).unwrap();
    let songs = &catalog.find("odd").unwrap().songs;
    assert!(songs[0].duration.is_nan());
    assert!(songs[1].duration.is_nan());
    assert!(songs[2].duration.is_nan());
    assert_eq!(songs[3].duration, 12.5);
}

#[test]
fn from_toml_str_resolves_relative_paths() {
    let catalog = Catalog::from_toml_str(CATALOG, Path::new("/music")).unwrap();
    assert_eq!(catalog.slugs(), vec!["the-colors", "the-telephone"]);

    let colors = catalog.find("the-colors").unwrap();
    assert_eq!(colors.cover, Some(PathBuf::from("/music/covers/colors.png")));
    assert_eq!(colors.songs[0].audio_src, PathBuf::from("/music/audio/blue.mp3"));
    assert_eq!(colors.songs[1].audio_src, PathBuf::from("/abs/green.mp3"));
    assert_eq!(colors.songs[0].duration, 161.71);
}

#[test]
fn missing_optional_fields_take_defaults() {
    let catalog = Catalog::from_toml_str(CATALOG, Path::new("/music")).unwrap();
    let phone = catalog.find("the-telephone").unwrap();
    assert_eq!(phone.release_info, "");
    assert!(phone.cover.is_none());
    assert!(phone.songs[0].duration.is_nan());
}

#[test]
fn find_unknown_slug_is_none() {
    let catalog = Catalog::from_toml_str(CATALOG, Path::new("/music")).unwrap();
    assert!(catalog.find("nope").is_none());
}

#[test]
fn duplicate_slug_is_rejected() {
    let text = r#"
[[album]]
slug = "x"
title = "X"
artist = "A"

[[album]]
slug = "x"
title = "X again"
artist = "B"
"#;
    let err = Catalog::from_toml_str(text, Path::new(".")).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateSlug(s) if s == "x"));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = Catalog::from_toml_str("[[album]\n", Path::new(".")).unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn load_reads_file_relative_to_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("albums.toml");
    std::fs::write(&path, CATALOG).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let colors = catalog.find("the-colors").unwrap();
    assert_eq!(colors.songs[0].audio_src, dir.path().join("audio/blue.mp3"));
}

#[test]
fn load_missing_file_is_io_error() {
    let err = Catalog::load(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn merge_keeps_first_source() {
    let mut a = Catalog::from_toml_str(CATALOG, Path::new("/music")).unwrap();
    let b: Catalog = vec![Album {
        slug: "the-colors".into(),
        title: "Shadowed".into(),
        artist: "Nobody".into(),
        release_info: String::new(),
        cover: None,
        songs: Vec::new(),
    }]
    .into_iter()
    .collect();

    a.merge(b);
    assert_eq!(a.len(), 2);
    assert_eq!(a.find("the-colors").unwrap().title, "The Colors");
}
