use super::*;
use crate::story::model::ItemData;

fn media(key: Option<&str>, alt: Option<&str>, src: Option<&str>) -> MediaDescriptor {
    MediaDescriptor {
        key: key.map(str::to_owned),
        alt: alt.map(str::to_owned),
        src: src.map(str::to_owned),
    }
}

fn item(key: Option<&str>, media: Option<MediaDescriptor>) -> ItemDescriptor {
    ItemDescriptor {
        key: key.map(str::to_owned),
        media,
        ancestor_classes: vec![],
        data: ItemData::default(),
    }
}

fn classes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn declared_item_key_wins() {
    let it = item(
        Some("mies-2"),
        Some(media(Some("other"), Some("Alt"), Some("a.png"))),
    );
    assert_eq!(raw_item_key(&it), "mies-2");
}

#[test]
fn media_sources_are_tried_in_order() {
    let it = item(None, Some(media(Some("img-key"), Some("Alt"), Some("a.png"))));
    assert_eq!(raw_item_key(&it), "img-key");

    let it = item(None, Some(media(None, Some("La Güera"), Some("a.png"))));
    assert_eq!(raw_item_key(&it), "la-guera");

    let it = item(None, Some(media(None, Some("   "), Some("img/noche/Ojos_Front.webp"))));
    assert_eq!(raw_item_key(&it), "ojos-front");

    let it = item(None, Some(media(None, None, Some(r"C:\art\Hoyo Negro.final.png"))));
    assert_eq!(raw_item_key(&it), "hoyo-negrofinal");
}

#[test]
fn empty_declared_keys_are_ignored() {
    let it = item(Some(""), Some(media(Some(""), Some("Llave"), None)));
    assert_eq!(raw_item_key(&it), "llave");
}

#[test]
fn unusable_sources_fall_back_to_constant() {
    assert_eq!(raw_item_key(&item(None, None)), UNKNOWN_ITEM_KEY);

    let it = item(None, Some(media(None, Some("¡!"), Some("???.png"))));
    assert_eq!(raw_item_key(&it), UNKNOWN_ITEM_KEY);
}

#[test]
fn file_stem_strips_only_last_extension() {
    assert_eq!(file_stem("a/b/c.tar.gz"), "c.tar");
    assert_eq!(file_stem("noext"), "noext");
    assert_eq!(file_stem("dir/trailing."), "trailing.");
    assert_eq!(file_stem("dir/"), "dir/");
}

#[test]
fn section_key_prefers_data_attribute() {
    let mut s = SectionDescriptor {
        section: Some("ciudad".to_owned()),
        id: Some("sec-2".to_owned()),
        ..SectionDescriptor::default()
    };
    assert_eq!(section_key(&s), "ciudad");
    s.section = Some(String::new());
    assert_eq!(section_key(&s), "sec-2");
    s.id = None;
    assert_eq!(section_key(&s), UNKNOWN_SECTION_KEY);
}

#[test]
fn layer_label_uses_nearest_marked_ancestor() {
    let ancestors = vec![
        classes(&["figure-wrap"]),
        classes(&["layer"]),
        classes(&["layer", "layer-mid"]),
        classes(&["layer", "layer-bg"]),
    ];
    assert_eq!(layer_label(&ancestors), "mid");
}

#[test]
fn layer_label_requires_marker_class() {
    let ancestors = vec![classes(&["layer-bg"])];
    assert_eq!(layer_label(&ancestors), DEFAULT_LAYER_LABEL);
    assert_eq!(layer_label(&[]), DEFAULT_LAYER_LABEL);
}

#[test]
fn layered_key_does_not_double_prefixes() {
    assert_eq!(
        compose_layered_key("ciudad", "front", "ciudad-front-mies-2"),
        "ciudad-front-mies-2"
    );
    assert_eq!(
        compose_layered_key("ciudad", "front", "front-mies"),
        "ciudad-front-mies"
    );
    assert_eq!(
        compose_layered_key("ciudad", "front", "mies"),
        "ciudad-front-mies"
    );
}

#[test]
fn layered_key_strips_each_prefix_once() {
    assert_eq!(
        compose_layered_key("a", "b", "a-a-b-x"),
        "a-b-a-b-x"
    );
    assert_eq!(compose_layered_key("noche", "mid", "mid-mid"), "noche-mid-mid");
}

#[test]
fn layered_key_never_has_empty_suffix() {
    assert_eq!(compose_layered_key("intro", "front", "intro-"), "intro-front-intro-");
    assert_eq!(
        compose_layered_key("intro", "front", "intro-front-"),
        "intro-front-intro-front-"
    );
}

#[test]
fn item_keys_combine_all_parts() {
    let mut it = item(None, Some(media(None, Some("Mies"), None)));
    it.ancestor_classes = vec![classes(&["layer", "layer-front"])];
    let keys = ItemKeys::derive("ciudad", &it);
    assert_eq!(keys.raw, "mies");
    assert_eq!(keys.layer, "front");
    assert_eq!(keys.layered, "ciudad-front-mies");
}
