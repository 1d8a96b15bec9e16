//! End-to-end conversion tests: block stream in, readable package out.

use mkdocx::model::{Block, Inline, ListItem};
use mkdocx::style::ConversionConfig;
use mkdocx::{convert_to_file, WritingMode};
use std::io::Read;

fn sized_config() -> ConversionConfig {
    let mut config = ConversionConfig::default();
    config.styles.h1.size = 18;
    config.styles.paragraph.size = 11;
    config.styles.list.size = 11;
    config.styles.code_block.size = 10;
    config.styles.code_block.monospace_font_ascii = "Courier New".into();
    config.styles.code_block.monospace_font_east_asia = "MS Gothic".into();
    config.styles.quote.size = 11;
    config
}

fn sample_blocks() -> Vec<Block> {
    vec![
        Block::Heading {
            level: 1,
            content: vec![Inline::Text("Title".into())],
        },
        Block::Paragraph {
            content: vec![Inline::Text("Body text.".into())],
        },
        Block::List {
            ordered: true,
            items: vec![ListItem::new("first"), ListItem::new("second")],
        },
        Block::CodeBlock {
            language: Some("sh".into()),
            code: "echo a\necho b".into(),
        },
        Block::Quote {
            content: vec![Inline::Text("Quoted.".into())],
        },
        Block::ThematicBreak,
    ]
}

fn read_part(path: &std::path::Path, part: &str) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut content = String::new();
    archive
        .by_name(part)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn convert_produces_readable_package() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.docx");

    convert_to_file(
        &sample_blocks(),
        &sized_config(),
        dir.path().join("book.md"),
        None,
        &output,
    )
    .unwrap();

    let document = read_part(&output, "word/document.xml");

    // Section descriptor precedes all content nodes.
    let sect_pos = document.find("<w:sectPr>").unwrap();
    let first_para_pos = document.find("<w:p>").unwrap();
    assert!(sect_pos < first_para_pos);

    assert!(document.contains("<w:t xml:space=\"preserve\">Title</w:t>"));
    assert!(document.contains("<w:t xml:space=\"preserve\">Body text.</w:t>"));
    assert!(document.contains("<w:t xml:space=\"preserve\">1. first</w:t>"));
    assert!(document.contains("<w:t xml:space=\"preserve\">2. second</w:t>"));
    assert!(document.contains("<w:t xml:space=\"preserve\">echo a</w:t>"));
    assert!(document.contains("<w:rFonts w:ascii=\"Courier New\" w:eastAsia=\"MS Gothic\"/>"));
    assert!(document.contains("<w:i/>"));
    assert!(document.contains("<w:outlineLvl w:val=\"0\"/>"));
}

#[test]
fn convert_vertical_mode_sets_section_direction() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("vertical.docx");

    let mut config = sized_config();
    config.text_direction = WritingMode::Vertical;

    convert_to_file(
        &sample_blocks(),
        &config,
        dir.path().join("book.md"),
        None,
        &output,
    )
    .unwrap();

    let document = read_part(&output, "word/document.xml");
    assert!(document.contains("<w:textDirection w:val=\"tbRl\"/>"));
    assert!(document.contains("w:orient=\"landscape\""));
    assert!(document.contains("<w:pgSz w:w=\"12950\" w:h=\"8646\""));
    assert!(document.contains("<w:kinsoku/>"));
}

#[test]
fn convert_with_toc_emits_field_construct() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("toc.docx");

    let mut config = sized_config();
    config.table_of_contents.enabled = true;
    config.table_of_contents.depth = 2;
    config.table_of_contents.title = Some("Contents".into());

    convert_to_file(
        &sample_blocks(),
        &config,
        dir.path().join("book.md"),
        None,
        &output,
    )
    .unwrap();

    let document = read_part(&output, "word/document.xml");
    assert!(document.contains("<w:fldChar w:fldCharType=\"begin\"/>"));
    assert!(document
        .contains("<w:instrText xml:space=\"preserve\"> TOC \\o \"1-2\" \\h \\z \\u </w:instrText>"));
    assert!(document.contains("<w:fldChar w:fldCharType=\"separate\"/>"));
    assert!(document.contains("<w:fldChar w:fldCharType=\"end\"/>"));
    assert!(document.contains("<w:t xml:space=\"preserve\">Contents</w:t>"));
}

#[test]
fn convert_with_cover_image_embeds_media() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("covered.docx");

    // Minimal PNG header: signature + IHDR with dimensions.
    let mut png = Vec::new();
    png.extend_from_slice(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    png.extend_from_slice(&13u32.to_be_bytes());
    png.extend_from_slice(b"IHDR");
    png.extend_from_slice(&400u32.to_be_bytes());
    png.extend_from_slice(&300u32.to_be_bytes());
    png.extend_from_slice(&[8, 6, 0, 0, 0]);
    std::fs::write(dir.path().join("cover.png"), &png).unwrap();

    let mut config = sized_config();
    config.title_page.enabled = true;
    config.title_page.image_path = Some("cover.png".into());

    convert_to_file(
        &sample_blocks(),
        &config,
        dir.path().join("book.md"),
        None,
        &output,
    )
    .unwrap();

    let document = read_part(&output, "word/document.xml");
    assert!(document.contains("<a:blip r:embed=\"rId1\"/>"));
    assert!(document.contains("<w:jc w:val=\"center\"/>"));

    let rels = read_part(&output, "word/_rels/document.xml.rels");
    assert!(rels.contains("Target=\"media/image1.png\""));

    let types = read_part(&output, "[Content_Types].xml");
    assert!(types.contains("Extension=\"png\" ContentType=\"image/png\""));

    let file = std::fs::File::open(&output).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut stored = Vec::new();
    archive
        .by_name("word/media/image1.png")
        .unwrap()
        .read_to_end(&mut stored)
        .unwrap();
    assert_eq!(stored, png);
}

#[test]
fn convert_missing_cover_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("broken.docx");

    let mut config = sized_config();
    config.title_page.enabled = true;
    config.title_page.image_path = Some("missing.png".into());

    let result = convert_to_file(
        &sample_blocks(),
        &config,
        dir.path().join("book.md"),
        None,
        &output,
    );
    assert!(matches!(result, Err(mkdocx::Error::NotFound(_))));
}
