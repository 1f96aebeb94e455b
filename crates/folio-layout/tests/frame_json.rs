//! Serialized frame shape consumed by web hosts.

use folio_core::visual::SplitSnapshot;
use folio_layout::{PanelRenderer, PixelRect, SplitMode};
use serde_json::{Value, json};

#[test]
fn interactive_frame_serializes_for_host() {
    let frame = PanelRenderer::default().render(
        PixelRect::from_size(1000.0, 600.0),
        SplitSnapshot::new(0.5, false),
    );
    let value = serde_json::to_value(frame).expect("frame serializes");

    assert_eq!(value["progress"], json!(0.5));
    assert_eq!(value["hover"], json!(false));
    assert_eq!(value["left"]["side"], json!("left"));
    assert_eq!(value["right"]["side"], json!("right"));
    assert_eq!(value["left"]["rect"]["width"], json!(500.0));
    assert_eq!(value["right"]["rect"]["x"], json!(500.0));
    assert_eq!(value["left"]["content"]["opacity"], json!(1.0));
    assert_eq!(value["indicator"]["opacity"], json!(0.12));
}

#[test]
fn stacked_frame_has_null_indicator() {
    let container = PixelRect::from_size(390.0, 844.0);
    assert_eq!(SplitMode::for_width(container.width), SplitMode::Stacked);

    let frame = PanelRenderer::default().render_stacked(container);
    let value = serde_json::to_value(frame).expect("frame serializes");
    assert_eq!(value["indicator"], Value::Null);
    assert_eq!(value["hover"], json!(false));

    // Stacked panels each span the full width, one above the other.
    for (side, y) in [("left", 0.0), ("right", 422.0)] {
        let panel = &value[side];
        assert_eq!(panel["width_fraction"], json!(1.0));
        assert_eq!(panel["rect"]["x"], json!(0.0));
        assert_eq!(panel["rect"]["y"], json!(y));
        assert_eq!(panel["rect"]["width"], json!(390.0));
        assert_eq!(panel["rect"]["height"], json!(422.0));
        assert_eq!(panel["content"]["opacity"], json!(1.0));
        assert_eq!(panel["content"]["blur_px"], json!(0.0));
    }
}

#[test]
fn idle_offsets_anchor_content() {
    let frame = PanelRenderer::default().render(
        PixelRect::from_size(1280.0, 720.0),
        SplitSnapshot::new(0.0, false),
    );
    assert_eq!(frame.left.rect.width, 1280.0);
    assert_eq!(frame.right.rect.width, 0.0);
    assert_eq!(frame.left.content.translate_x_px, 48.0);
    assert_eq!(frame.right.content.translate_x_px, 0.0);
}
