use chrono::TimeZone;

use super::*;

#[test]
fn file_name_uses_unix_millis() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    assert_eq!(export_file_name(now), "thumbnail-1700000000123.png");
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = [64u8, 32, 0, 128, 10, 20, 30, 255, 5, 5, 5, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..], &[5, 5, 5, 0]);
}

#[test]
fn encode_png_decodes_back_to_frame_size() {
    let frame = FrameRGBA {
        width: 3,
        height: 2,
        data: [255u8, 0, 0, 255].repeat(6),
        premultiplied: true,
    };
    let bytes = encode_png(&frame).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
}

#[test]
fn encode_png_rejects_short_buffers() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 10],
        premultiplied: true,
    };
    assert!(encode_png(&frame).is_err());
}

#[test]
fn save_in_writes_under_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let png = ExportedPng {
        file_name: "thumbnail-1.png".to_string(),
        bytes: vec![1, 2, 3],
    };
    let path = png.save_in(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("thumbnail-1.png"));
    assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
}
