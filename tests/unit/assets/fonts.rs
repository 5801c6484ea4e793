use super::*;

#[test]
fn empty_book_has_no_faces() {
    let book = FontBook::empty();
    assert!(book.is_empty());
    assert!(book.face(FontFamily::BebasNeue).is_none());
}

#[test]
fn missing_family_falls_back_to_first_loaded_family() {
    let mut book = FontBook::empty();
    book.insert(FontFamily::Inter, vec![1]);
    book.insert(FontFamily::Poppins, vec![2]);

    let face = book.face(FontFamily::BebasNeue).unwrap();
    assert_eq!(face.family, FontFamily::Poppins);
    assert_eq!(face.bytes.as_slice(), &[2]);

    let face = book.face(FontFamily::Inter).unwrap();
    assert_eq!(face.family, FontFamily::Inter);
}

#[test]
fn from_dir_matches_family_names_loosely_and_prefers_heavy_styles() {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, byte: u8| std::fs::write(dir.path().join(name), [byte]).unwrap();
    write("BebasNeue-Regular.ttf", 1);
    write("montserrat-regular.ttf", 2);
    write("Montserrat-Black.ttf", 3);
    write("Montserrat-Italic.otf", 4);
    write("poppins.txt", 5);
    write("README", 6);

    let book = FontBook::from_dir(dir.path()).unwrap();
    assert_eq!(book.face(FontFamily::BebasNeue).unwrap().bytes.as_slice(), &[1]);
    assert_eq!(book.face(FontFamily::Montserrat).unwrap().bytes.as_slice(), &[3]);
    assert!(!book.contains(FontFamily::Poppins));
    assert!(!book.contains(FontFamily::Inter));
}

#[test]
fn from_dir_reports_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FontBook::from_dir(&dir.path().join("nope")).is_err());
}

#[test]
fn layout_rejects_non_positive_size() {
    let mut engine = TextLayoutEngine::new();
    let face = FontFace {
        family: FontFamily::Inter,
        bytes: Arc::new(Vec::new()),
    };
    assert!(engine.layout_line("HI", &face, 0.0).is_err());
    assert!(engine.layout_line("HI", &face, f32::NAN).is_err());
}

#[test]
fn unparseable_font_bytes_are_an_error() {
    let mut engine = TextLayoutEngine::new();
    let face = FontFace {
        family: FontFamily::Inter,
        bytes: Arc::new(vec![0, 1, 2, 3]),
    };
    assert!(engine.layout_line("HI", &face, 40.0).is_err());
}

#[test]
fn italic_faces_win_at_equal_weight() {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, byte: u8| std::fs::write(dir.path().join(name), [byte]).unwrap();
    write("Poppins-Black.ttf", 1);
    write("Poppins-BlackItalic.ttf", 2);
    write("Poppins-BoldItalic.ttf", 3);
    write("Inter-Bold.ttf", 4);
    write("Inter-BoldItalic.ttf", 5);
    write("Inter-Italic.ttf", 6);
    write("Inter-ThinItalic.ttf", 7);

    let book = FontBook::from_dir(dir.path()).unwrap();
    assert_eq!(book.face(FontFamily::Poppins).unwrap().bytes.as_slice(), &[2]);
    assert_eq!(book.face(FontFamily::Inter).unwrap().bytes.as_slice(), &[5]);
}

#[test]
fn style_rank_orders_weight_before_slant() {
    assert!(style_rank("blackitalic") > style_rank("black"));
    assert!(style_rank("black") > style_rank("bolditalic"));
    assert!(style_rank("italic") > style_rank("regular"));
    assert_eq!(style_rank(""), style_rank("regular"));
    assert!(style_rank("thinitalic") < style_rank(""));
}

#[test]
fn fixture_font_shapes_a_line() {
    let bytes = std::fs::read("tests/data/fonts/DejaVuSans-Bold.ttf").unwrap();
    let face = FontFace {
        family: FontFamily::BebasNeue,
        bytes: Arc::new(bytes),
    };
    let mut engine = TextLayoutEngine::new();
    let layout = engine.layout_line("HELLO", &face, 120.0).unwrap();
    assert!(layout.width() > 0.0);
    assert!(layout.height() > 0.0);
    assert_eq!(layout.lines().count(), 1);
    assert!(!engine.family_name(&face).unwrap().trim().is_empty());
}
