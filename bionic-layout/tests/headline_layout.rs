use bionic_core::{
    Alignment, BoxIndex, BrandConstants, Composition, HeadlineStyle, LayoutConfig, PaletteColor,
    Stacking, Theme,
};
use bionic_layout::{project, HeadlineLayout, HeadlineScene, PreviewOptions};
use bionic_text::FixedAdvanceGlyphs;

fn compute(config: &LayoutConfig) -> HeadlineScene {
    let brand = BrandConstants::default();
    let mut glyphs = FixedAdvanceGlyphs::new();
    HeadlineLayout::new(&brand)
        .compute(config, &mut glyphs)
        .expect("fixed metrics never fail")
}

#[test]
fn test_identical_texts_centered_share_x() {
    let config = LayoutConfig {
        text1: "SAME".into(),
        text2: "SAME".into(),
        composition: Composition::Offset,
        alignment: Alignment::Center,
        ..LayoutConfig::default()
    };
    let scene = compute(&config);
    assert_eq!(scene.metrics.horizontal_shift, 0.0);
    assert_eq!(
        scene.placed(BoxIndex::One).frame.center_x,
        scene.placed(BoxIndex::Two).frame.center_x
    );
}

#[test]
fn test_negative_word_spacing_narrows_second_box() {
    let base = LayoutConfig {
        text2: "HEADING STYLE AGAIN".into(),
        spacing_locked: false,
        word_spacing_em: 0.0,
        ..LayoutConfig::default()
    };
    let tight = LayoutConfig {
        word_spacing_em: -0.3,
        ..base.clone()
    };
    let loose_scene = compute(&base);
    let tight_scene = compute(&tight);
    let loose = loose_scene.placed(BoxIndex::Two);
    let tight = tight_scene.placed(BoxIndex::Two);
    assert!(tight.frame.width < loose.frame.width);

    let mut spaces = 0.0;
    for (l, t) in loose.run.glyphs().iter().zip(tight.run.glyphs()) {
        assert!((t.x_offset - (l.x_offset - spaces * 30.0)).abs() < 1e-9);
        if l.ch == ' ' {
            spaces += 1.0;
        }
    }
}

#[test]
fn test_themes_resolve_per_box() {
    let brand = BrandConstants::default();
    let config = LayoutConfig {
        theme: Theme::Grey,
        ..LayoutConfig::default()
    };
    let scene = compute(&config);
    let b1 = scene.placed(BoxIndex::One);
    let b2 = scene.placed(BoxIndex::Two);
    assert_eq!(b1.colors.background, brand.color(PaletteColor::Grey));
    assert_eq!(b1.colors.text, brand.color(PaletteColor::Navy));
    assert_eq!(b2.colors.background, brand.color(PaletteColor::White));
}

#[test]
fn test_snapshot_to_preview() {
    let json = r#"{
        "text1": "LAUNCH",
        "text2": "WEEK",
        "style": "standard",
        "composition": "offset",
        "stacking": "box1Top",
        "alignment": "left",
        "themeId": "blue",
        "canvasBackground": "transparent",
        "fontSizePx": 120.0
    }"#;
    let config = LayoutConfig::from_json(json).unwrap();
    assert_eq!(config.style, HeadlineStyle::Standard);
    assert_eq!(config.stacking, Stacking::Box1Top);

    let scene = compute(&config);
    let brand = BrandConstants::default();
    let preview = project(&scene, &brand, &PreviewOptions::default()).unwrap();
    assert!(preview.background.is_none());
    assert_eq!(preview.node(BoxIndex::One).unwrap().z_index, 40);

    let shifted = preview.node(BoxIndex::Two).unwrap();
    assert!(shifted.translate_x > 0.0);
    let (x, _) = shifted.center();
    assert!((x - scene.placed(BoxIndex::Two).frame.center_x).abs() < 0.01);
}
