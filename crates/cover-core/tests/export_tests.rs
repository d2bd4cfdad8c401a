use std::future::Future;
use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cover_core::export::DecodedImage;
use cover_core::*;
use tempfile::NamedTempFile;

/// Decoder that rejects every source
struct FailingDecoder;

impl ImageDecoder for FailingDecoder {
    fn decode(&self, src: &str) -> impl Future<Output = Result<DecodedImage>> + Send {
        let src = src.to_string();
        async move { Err(CoverError::Decode(format!("cannot decode {}", src))) }
    }
}

fn fast_options() -> ExportOptions {
    ExportOptions {
        raster_dpi: 20.0,
        ..ExportOptions::default()
    }
}

fn png_data_url(width: u32, height: u32) -> String {
    let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(&bytes))
}

fn page_content(doc: &lopdf::Document) -> String {
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.get(&1).unwrap();
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

fn media_box(doc: &lopdf::Document) -> Vec<f32> {
    let page_id = *doc.get_pages().get(&1).unwrap();
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

#[tokio::test]
async fn test_export_page_matches_wrap_size() {
    let doc = create_default_document();
    let artifact = export_pdf(&doc, &fast_options(), &SourceDecoder).await.unwrap();

    assert_eq!(artifact.layout.page_width_pt, 513.0);
    assert_eq!(artifact.layout.page_height_pt, 396.0);
    assert_eq!(artifact.layout.bleed_pt, 0.0);
    assert_eq!(artifact.layout.raster_width_px, 143);
    assert_eq!(artifact.layout.raster_height_px, 110);
    assert_eq!(media_box(&artifact.document), vec![0.0, 0.0, 513.0, 396.0]);
    assert!(artifact.skipped_images.is_empty());
}

#[tokio::test]
async fn test_bleed_requires_option_and_setting() {
    let mut doc = create_default_document();

    let with_option = ExportOptions {
        include_bleed: true,
        ..fast_options()
    };
    let layout = ExportLayout::compute(&doc, &with_option).unwrap();
    assert_eq!(layout.page_width_pt, 513.0);

    doc.settings.bleed_enabled = true;
    let layout = ExportLayout::compute(&doc, &fast_options()).unwrap();
    assert_eq!(layout.page_width_pt, 513.0);

    let artifact = export_pdf(&doc, &with_option, &SourceDecoder).await.unwrap();
    assert_eq!(artifact.layout.bleed_pt, 9.0);
    assert_eq!(media_box(&artifact.document), vec![0.0, 0.0, 531.0, 414.0]);

    // raster sits inside the bleed
    let content = page_content(&artifact.document);
    assert!(content.contains("q 513 0 0 396 9 9 cm /Im0 Do Q"));
}

#[tokio::test]
async fn test_content_has_raster_text_and_guides() {
    let doc = create_default_document();
    let options = ExportOptions {
        include_fold_lines: true,
        include_centerline: true,
        ..fast_options()
    };
    let artifact = export_pdf(&doc, &options, &SourceDecoder).await.unwrap();
    let content = page_content(&artifact.document);

    assert!(content.contains("/Im0 Do"));
    assert!(content.contains("(FIELD NOTES) Tj"));
    assert!(content.contains("(\\225 Ideas & Sketches) Tj"));
    // fold line blue, centerline yellow, cut line magenta
    assert!(content.contains("0 0.6 1 RG"));
    assert!(content.contains("1 0.8 0 RG"));
    assert!(content.contains("1 0 0.4 RG"));

    // cut line is the last thing drawn
    let cut = content.rfind("1 0 0.4 RG").unwrap();
    assert!(content.rfind("Tj").unwrap() < cut);
    assert!(content.rfind("0 0.6 1 RG").unwrap() < cut);
}

#[tokio::test]
async fn test_guides_can_be_left_out() {
    let doc = create_default_document();
    let options = ExportOptions {
        include_fold_lines: false,
        ..fast_options()
    };
    let artifact = export_pdf(&doc, &options, &SourceDecoder).await.unwrap();
    let content = page_content(&artifact.document);

    assert!(!content.contains("0 0.6 1 RG"));
    assert!(content.contains("1 0 0.4 RG"));
}

#[tokio::test]
async fn test_failed_images_are_skipped() {
    let mut doc = create_default_document();
    let mut ids = SequentialIds::new("img");
    doc.front
        .objects
        .push(create_image_object(&mut ids, "logo.png", 300, 300));
    doc.wrap_image.enabled = true;
    doc.wrap_image.src = "wrap.png".to_string();

    let artifact = export_pdf(&doc, &fast_options(), &FailingDecoder).await.unwrap();
    assert_eq!(artifact.skipped_images, vec!["wrap.png", "logo.png"]);
    assert!(page_content(&artifact.document).contains("/Im0 Do"));
}

#[tokio::test]
async fn test_missing_file_is_skipped_by_source_decoder() {
    let mut doc = create_default_document();
    let mut ids = SequentialIds::new("img");
    doc.back.objects.push(create_image_object(
        &mut ids,
        "/nonexistent/cover-art.png",
        100,
        100,
    ));

    let artifact = export_pdf(&doc, &fast_options(), &SourceDecoder).await.unwrap();
    assert_eq!(artifact.skipped_images, vec!["/nonexistent/cover-art.png"]);
}

#[tokio::test]
async fn test_data_url_images_are_embedded() {
    let mut doc = create_default_document();
    let src = png_data_url(8, 8);
    let mut ids = SequentialIds::new("img");
    doc.front.objects.push(create_image_object(&mut ids, src.clone(), 8, 8));

    let decoded = SourceDecoder.decode(&src).await.unwrap();
    assert_eq!((decoded.width, decoded.height), (8, 8));

    let artifact = export_pdf(&doc, &fast_options(), &SourceDecoder).await.unwrap();
    assert!(artifact.skipped_images.is_empty());
}

#[tokio::test]
async fn test_invalid_dpi_fails_in_layout() {
    let doc = create_default_document();
    let options = ExportOptions {
        raster_dpi: 0.0,
        ..ExportOptions::default()
    };
    let result = export_pdf(&doc, &options, &SourceDecoder).await;
    assert!(matches!(
        result,
        Err(CoverError::Export {
            phase: ExportPhase::Layout,
            ..
        })
    ));
}

#[tokio::test]
async fn test_save_pdf_writes_loadable_file() {
    let doc = create_default_document();
    let mut artifact = export_pdf(&doc, &fast_options(), &SourceDecoder).await.unwrap();

    let bytes = artifact.to_bytes().unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));

    let temp = NamedTempFile::new().unwrap();
    save_pdf(artifact.document, temp.path()).await.unwrap();

    let loaded = lopdf::Document::load(temp.path()).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);
}

#[tokio::test]
async fn test_export_options_file_round_trip() {
    let options = ExportOptions {
        include_bleed: true,
        include_safe_area: true,
        raster_dpi: 150.0,
        ..ExportOptions::default()
    };
    let temp = NamedTempFile::new().unwrap();
    options.save(temp.path()).await.unwrap();
    assert_eq!(ExportOptions::load(temp.path()).await.unwrap(), options);
}

#[test]
fn test_options_from_settings() {
    let mut settings = Settings::default();
    settings.bleed_enabled = true;
    settings.show_safe_area = true;
    settings.show_fold_lines = false;

    let options = ExportOptions::from_settings(&settings);
    assert!(options.include_bleed);
    assert!(options.include_safe_area);
    assert!(!options.include_fold_lines);
    assert_eq!(options.raster_dpi, 300.0);
}

fn wide_text(align: TextAlign) -> Document {
    let mut doc = create_default_document();
    let mut ids = SequentialIds::new("txt");
    let text = create_text_object(
        &mut ids,
        Position::new(0.0, 0.0),
        TextProps {
            content: "WWWWWWWW".to_string(),
            font_family: "Helvetica, sans-serif".to_string(),
            font_size: 24.0,
            font_weight: 400,
            letter_spacing: 0.0,
            text_align: align,
            width: 3.0,
            ..TextProps::default()
        },
    );
    doc.panel_mut(Side::Back).objects = vec![text];
    doc
}

#[tokio::test]
async fn test_centered_text_is_placed_by_glyph_widths() {
    let doc = wide_text(TextAlign::Center);
    let artifact = export_pdf(&doc, &fast_options(), &SourceDecoder).await.unwrap();
    let content = page_content(&artifact.document);

    // 8 x 944/1000 x 24pt = 181.248pt, centered in a 216pt box
    assert!(content.contains("(WWWWWWWW) Tj"));
    assert!(content.contains("1 0 0 -1 17.376 17.232 Tm"), "{}", content);
}

#[tokio::test]
async fn test_right_aligned_text_ends_at_box_edge() {
    let doc = wide_text(TextAlign::Right);
    let artifact = export_pdf(&doc, &fast_options(), &SourceDecoder).await.unwrap();
    let content = page_content(&artifact.document);

    assert!(content.contains("1 0 0 -1 34.752 17.232 Tm"), "{}", content);
}
