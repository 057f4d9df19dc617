use super::*;
use crate::story::model::{ItemData, LayerDescriptor, MediaDescriptor};
use serde_json::json;

fn table() -> OverrideTable {
    serde_json::from_value(json!({
        "noche": {
            "_meta": { "zIndex": 50, "marginTop": "350vh", "offsetX": 12, "offsetY": "  ", "paddingLeft": "" },
            "noche-front-miles-1": { "baseX": 20, "baseY": -40, "baseScale": 1, "note": "anchor" },
            "noche-front-aura": { "group": "noche-front-miles-1", "offsetX": -45, "offsetY": 178, "zIndex": 10 },
            "noche-front-kirsten": { "offsetY": 128, "hidden": true, "note": "cut" },
            "noche-bg-grid": { "baseX": -0.3, "fullWidth": true, "width": 1280, "animate": "none" },
            "patrulla": { "visible": false }
        }
    }))
    .unwrap()
}

fn item_with_alt(alt: &str, layer: &str) -> ItemDescriptor {
    ItemDescriptor {
        key: None,
        media: Some(MediaDescriptor {
            key: None,
            alt: Some(alt.to_owned()),
            src: None,
        }),
        ancestor_classes: vec![vec!["layer".to_owned(), format!("layer-{layer}")]],
        data: ItemData::default(),
    }
}

#[test]
fn inherited_offsets_reach_the_style() {
    let t = table();
    let p = place_item("noche", t.section("noche"), &item_with_alt("Aura", "front"));
    assert_eq!(p.layout_key, "noche-front-aura");
    assert_eq!(p.matched, Some(KeySpace::Layered));
    assert_eq!(p.note.as_deref(), Some("anchor"));
    assert!(!p.hidden);
    let style = p.style.unwrap();
    assert_eq!(style.base_x, -25.0);
    assert_eq!(style.base_y, 138.0);
    assert_eq!(style.base_scale, 1.0);
    assert_eq!(style.z_index, Some(10.0));
    assert_eq!(style.media, Some(MediaSize::default()));
}

#[test]
fn hidden_items_carry_no_style() {
    let t = table();
    let p = place_item("noche", t.section("noche"), &item_with_alt("Kirsten", "front"));
    assert!(p.hidden);
    assert!(p.style.is_none());
    assert_eq!(p.note.as_deref(), Some("cut"));

    let p = place_item("noche", t.section("noche"), &item_with_alt("Patrulla", "mid"));
    assert_eq!(p.matched, Some(KeySpace::Raw));
    assert!(p.hidden);
}

#[test]
fn media_size_and_animation_from_override() {
    let t = table();
    let mut item = item_with_alt("Grid", "bg");
    item.data.animate = Some("fade-in".to_owned());
    let p = place_item("noche", t.section("noche"), &item);
    let style = p.style.unwrap();
    assert!(style.full_width);
    assert_eq!(
        style.media,
        Some(MediaSize {
            width: Some("1280px".to_owned()),
            height: None,
        })
    );
    assert_eq!(style.animate, None);
}

#[test]
fn item_data_fills_gaps_without_override() {
    let item = ItemDescriptor {
        key: Some("loose".to_owned()),
        media: None,
        ancestor_classes: vec![],
        data: ItemData {
            base_x: Some(json!("7")),
            base_y: Some(json!("12vh")),
            base_scale: None,
            z_index: Some(json!("3")),
            animate: Some("orbit".to_owned()),
        },
    };
    let p = place_item("fin", None, &item);
    assert_eq!(p.layout_key, "fin-front-loose");
    assert_eq!(p.matched, None);
    assert!(!p.hidden);
    let style = p.style.unwrap();
    assert_eq!(style.base_x, 7.0);
    assert_eq!(style.base_y, 12.0);
    assert_eq!(style.base_scale, 1.0);
    assert_eq!(style.z_index, Some(3.0));
    assert!(style.media.is_none());
    assert_eq!(style.animate.as_deref(), Some("orbit"));
}

#[test]
fn override_values_beat_item_data() {
    let t = table();
    let mut item = item_with_alt("Miles 1", "front");
    item.data.base_x = Some(json!(99));
    item.data.base_scale = Some(json!(3));
    let style = place_item("noche", t.section("noche"), &item).style.unwrap();
    assert_eq!(style.base_x, 20.0);
    assert_eq!(style.base_scale, 1.0);
}

#[test]
fn section_layout_normalizes_meta() {
    let t = table();
    let layout = SectionLayout::from_meta(t.section("noche").and_then(SectionTable::meta));
    assert_eq!(layout.z_index, Some(50.0));
    assert_eq!(layout.offset_x.as_deref(), Some("12px"));
    assert_eq!(layout.offset_y, None);
    assert_eq!(layout.margin_top.as_deref(), Some("350vh"));
    assert_eq!(layout.padding_left.as_deref(), Some(""));
    assert_eq!(layout.padding_right, None);

    assert_eq!(SectionLayout::from_meta(None), SectionLayout::default());
}

#[test]
fn plan_story_covers_sections_layers_and_items() {
    let story = Storyboard {
        sections: vec![
            SectionDescriptor {
                section: Some("noche".to_owned()),
                id: None,
                layers: vec![LayerDescriptor {
                    classes: vec!["layer".to_owned(), "layer-bg".to_owned()],
                    speed: None,
                }],
                items: vec![item_with_alt("Grid", "bg"), item_with_alt("Aura", "front")],
            },
            SectionDescriptor {
                section: None,
                id: Some("epilogo".to_owned()),
                layers: vec![],
                items: vec![ItemDescriptor::default()],
            },
        ],
    };
    let plan = plan_story(&story, &table());
    assert_eq!(plan.sections.len(), 2);

    let noche = &plan.sections[0];
    assert_eq!(noche.key, "noche");
    assert_eq!(noche.layers[0].speed, 0.35);
    assert_eq!(noche.items.len(), 2);
    assert_eq!(noche.items[0].layout_key, "noche-bg-grid");

    let epilogo = &plan.sections[1];
    assert_eq!(epilogo.key, "epilogo");
    assert_eq!(epilogo.layout, SectionLayout::default());
    assert_eq!(epilogo.items[0].layout_key, "epilogo-front-unknown-item");
}
