use super::*;
use crate::catalog::{Track, seed_tracks};

fn t(id: &str, title: &str, artist: &str, album: &str, year: Option<i32>) -> Track {
    Track {
        id: id.into(),
        title: title.into(),
        artist: artist.into(),
        album: album.into(),
        year,
        duration_sec: None,
    }
}

fn titles(tracks: &[&Track]) -> Vec<String> {
    tracks.iter().map(|t| t.title.clone()).collect()
}

fn ids(tracks: &[&Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

fn params() -> QueryParams {
    QueryParams::default()
}

#[test]
fn default_params_sort_by_title_ascending_without_groups() {
    let p = params();
    assert_eq!(p.sort_key, SortKey::Title);
    assert_eq!(p.direction, SortDirection::Ascending);
    assert_eq!(p.group_by, GroupKey::None);
    assert!(!p.has_filters());
}

#[test]
fn artist_filter_muse_returns_two_tracks() {
    let seed = seed_tracks();
    let p = QueryParams {
        artist: "Muse".into(),
        ..params()
    };
    let view = run(&seed, &p);
    let DerivedView::Flat(tracks) = view else {
        panic!("expected a flat view");
    };
    assert_eq!(titles(&tracks), vec!["Hysteria", "Starlight"]);
    assert!(tracks.iter().all(|t| t.artist == "Muse"));
}

#[test]
fn filters_are_case_insensitive() {
    let seed = seed_tracks();
    let p = QueryParams {
        artist: "mUsE".into(),
        album: "ABSOL".into(),
        ..params()
    };
    assert_eq!(titles(&filter(&seed, &p)), vec!["Hysteria"]);
}

#[test]
fn search_matches_title_artist_album_run_together() {
    let seed = seed_tracks();

    let by_album = QueryParams {
        search: "meteora".into(),
        ..params()
    };
    assert_eq!(titles(&filter(&seed, &by_album)), vec!["Numb"]);

    // "Numb" + "Linkin Park": the term spans the title/artist boundary.
    let spanning = QueryParams {
        search: "numblinkin".into(),
        ..params()
    };
    assert_eq!(titles(&filter(&seed, &spanning)), vec!["Numb"]);
}

#[test]
fn empty_terms_pass_everything_through() {
    let seed = seed_tracks();
    assert_eq!(filter(&seed, &params()).len(), seed.len());
}

#[test]
fn whitespace_term_is_not_treated_as_empty() {
    let seed = seed_tracks();
    let p = QueryParams {
        album: " ".into(),
        ..params()
    };
    // only albums containing a space survive
    assert!(filter(&seed, &p).iter().all(|t| t.album.contains(' ')));
    assert!(filter(&seed, &p).len() < seed.len());
}

#[test]
fn filters_compose_conjunctively_and_monotonically() {
    let seed = seed_tracks();
    let base = QueryParams {
        search: "o".into(),
        ..params()
    };
    let base_len = filter(&seed, &base).len();

    for (artist, album) in [("foo", ""), ("", "one"), ("foo", "one"), ("zzz", "")] {
        let narrowed = QueryParams {
            artist: artist.into(),
            album: album.into(),
            ..base.clone()
        };
        assert!(filter(&seed, &narrowed).len() <= base_len);
    }

    let both = QueryParams {
        artist: "foo".into(),
        album: "one".into(),
        ..params()
    };
    assert_eq!(titles(&filter(&seed, &both)), vec!["Times Like These"]);
}

#[test]
fn text_sort_is_case_sensitive() {
    let tracks = vec![
        t("1", "apple", "x", "x", None),
        t("2", "Banana", "x", "x", None),
        t("3", "Apple", "x", "x", None),
    ];
    let mut view = filter(&tracks, &params());
    sort(&mut view, SortKey::Title, SortDirection::Ascending);
    assert_eq!(titles(&view), vec!["Apple", "Banana", "apple"]);
}

#[test]
fn year_sort_is_numeric_with_missing_years_lowest() {
    let tracks = vec![
        t("1", "a", "x", "x", Some(2003)),
        t("2", "b", "x", "x", None),
        t("3", "c", "x", "x", Some(999)),
        t("4", "d", "x", "x", Some(10000)),
    ];
    let mut view = filter(&tracks, &params());
    sort(&mut view, SortKey::Year, SortDirection::Ascending);
    assert_eq!(ids(&view), vec!["2", "3", "1", "4"]);

    sort(&mut view, SortKey::Year, SortDirection::Descending);
    assert_eq!(ids(&view), vec!["4", "1", "3", "2"]);
}

#[test]
fn sort_is_stable_in_both_directions() {
    let tracks = vec![
        t("1", "z", "Same", "x", None),
        t("2", "a", "Other", "x", None),
        t("3", "m", "Same", "x", None),
        t("4", "b", "Same", "x", None),
    ];

    let mut asc = filter(&tracks, &params());
    sort(&mut asc, SortKey::Artist, SortDirection::Ascending);
    assert_eq!(ids(&asc), vec!["2", "1", "3", "4"]);

    let mut desc = filter(&tracks, &params());
    sort(&mut desc, SortKey::Artist, SortDirection::Descending);
    assert_eq!(ids(&desc), vec!["1", "3", "4", "2"]);
}

#[test]
fn group_by_artist_on_seed_keeps_title_order_inside_groups() {
    let seed = seed_tracks();
    let p = QueryParams {
        group_by: GroupKey::Artist,
        ..params()
    };
    let DerivedView::Grouped(groups) = run(&seed, &p) else {
        panic!("expected groups");
    };

    let foo = groups.iter().find(|g| g.label == "Foo Fighters").unwrap();
    assert_eq!(
        titles(&foo.tracks),
        vec!["Everlong", "The Pretender", "Times Like These"]
    );
}

#[test]
fn groups_appear_in_first_encountered_order() {
    let seed = seed_tracks();
    let p = QueryParams {
        group_by: GroupKey::Artist,
        ..params()
    };
    let DerivedView::Grouped(groups) = run(&seed, &p) else {
        panic!("expected groups");
    };
    let labels: Vec<&str> = groups.iter().map(|g| g.label).collect();
    // titles ascending: Blackbird, Everlong, Fix You, Hysteria, In The End, ...
    assert_eq!(
        labels,
        vec!["Alter Bridge", "Foo Fighters", "Coldplay", "Muse", "Linkin Park"]
    );
}

#[test]
fn grouping_by_album_uses_literal_album_strings() {
    let tracks = vec![
        t("1", "a", "x", "Live", None),
        t("2", "b", "x", "live", None),
        t("3", "c", "x", "Live", None),
    ];
    let p = QueryParams {
        group_by: GroupKey::Album,
        ..params()
    };
    let DerivedView::Grouped(groups) = run(&tracks, &p) else {
        panic!("expected groups");
    };
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "Live");
    assert_eq!(ids(&groups[0].tracks), vec!["1", "3"]);
    assert_eq!(groups[1].label, "live");
}

#[test]
fn grouping_is_complete_and_duplicate_free() {
    let seed = seed_tracks();
    for group_by in [GroupKey::Album, GroupKey::Artist] {
        for sort_key in [SortKey::Title, SortKey::Artist, SortKey::Album, SortKey::Year] {
            let flat = run(
                &seed,
                &QueryParams {
                    search: "e".into(),
                    sort_key,
                    ..params()
                },
            )
            .tracks();
            let grouped = run(
                &seed,
                &QueryParams {
                    search: "e".into(),
                    sort_key,
                    group_by,
                    ..params()
                },
            );

            assert_eq!(grouped.len(), flat.len());
            let mut a = ids(&flat);
            let mut b = ids(&grouped.tracks());
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }
}

#[test]
fn no_group_key_yields_flat_view() {
    let seed = seed_tracks();
    assert!(matches!(run(&seed, &params()), DerivedView::Flat(v) if v.len() == 10));
}

#[test]
fn empty_result_is_an_empty_view() {
    let seed = seed_tracks();
    let p = QueryParams {
        search: "no such thing".into(),
        group_by: GroupKey::Album,
        ..params()
    };
    let view = run(&seed, &p);
    assert!(view.is_empty());
    assert_eq!(view, DerivedView::Grouped(Vec::new()));
}

#[test]
fn pipeline_is_deterministic_and_leaves_catalog_untouched() {
    let seed = seed_tracks();
    let p = QueryParams {
        search: "a".into(),
        sort_key: SortKey::Year,
        direction: SortDirection::Descending,
        group_by: GroupKey::Artist,
        ..params()
    };
    let first = run(&seed, &p);
    let second = run(&seed, &p);
    assert_eq!(first, second);
    assert_eq!(seed, seed_tracks());
}

#[test]
fn cycles_wrap_around() {
    assert_eq!(SortKey::Year.cycle(), SortKey::Title);
    assert_eq!(GroupKey::Artist.cycle(), GroupKey::None);
    assert_eq!(
        SortDirection::Ascending.toggle().toggle(),
        SortDirection::Ascending
    );
}
