//! Pipeline scenarios exercised through the public library API.

use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};
use spriteregrid::extract::extract_sprite;
use spriteregrid::guides::{GridConfig, GuidePositions};
use spriteregrid::pipeline::{process, process_with, ProcessOptions, TrimMode};
use spriteregrid::repack::{repack, SpriteSizing};
use spriteregrid::resolve::resolve_max_width;
use spriteregrid::session::EditorSession;

const OPAQUE: Rgba<u8> = Rgba([180, 90, 30, 255]);

fn fill(image: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            image.put_pixel(x, y, OPAQUE);
        }
    }
}

/// 256x64 sheet, four 64px sections, each with a 50x64 block centred in it.
fn four_block_sheet() -> RgbaImage {
    let mut sheet = RgbaImage::new(256, 64);
    for section in 0..4 {
        fill(&mut sheet, section * 64 + 7, 0, 50, 64);
    }
    sheet
}

fn digest(image: &RgbaImage) -> Vec<u8> {
    Sha256::digest(image.as_raw()).to_vec()
}

#[test]
fn test_four_equal_sections_extract_width_50() {
    let sheet = four_block_sheet();
    let guides = GuidePositions::new(vec![64, 128, 192]);

    for section in guides.sections(sheet.width()) {
        let sprite = extract_sprite(&sheet, section.start_x, section.end_x, 0, 64).unwrap();
        assert_eq!(sprite.width, 50, "section {}", section.index);
        assert_eq!(sprite.offset_x, 7);
    }

    assert_eq!(resolve_max_width(&sheet, &guides, 1, 64, 1), 50);
    assert_eq!(resolve_max_width(&sheet, &guides, 1, 64, 64), 64);
}

#[test]
fn test_four_equal_sections_repack_at_exact_width() {
    let sheet = four_block_sheet();
    let guides = GuidePositions::new(vec![64, 128, 192]);

    let packed = repack(&sheet, &guides, 1, 64, 50, SpriteSizing::Native);
    assert_eq!(packed.dimensions(), (200, 64));
    // No margin left: every column is opaque
    assert!(packed.pixels().all(|p| p[3] == 255));
}

#[test]
fn test_four_equal_sections_repack_with_minimum_cell() {
    let sheet = four_block_sheet();
    let guides = GuidePositions::new(vec![64, 128, 192]);
    let config = GridConfig { sprite_height: 64, num_columns: 3, num_rows: 1, ..Default::default() };

    let packed = process_with(&sheet, &guides, &config, &ProcessOptions { trim: TrimMode::Disabled })
        .unwrap();
    assert_eq!(packed.cell_width, 64);
    assert_eq!(packed.image.width(), 64 * 4);

    // Margin (64 - 50) / 2 = 7 on each side of every cell
    for cell in 0..4 {
        let origin = cell * 64;
        assert_eq!(packed.image.get_pixel(origin + 6, 32)[3], 0);
        assert_eq!(packed.image.get_pixel(origin + 7, 32)[3], 255);
        assert_eq!(packed.image.get_pixel(origin + 56, 32)[3], 255);
        assert_eq!(packed.image.get_pixel(origin + 57, 32)[3], 0);
    }
}

#[test]
fn test_transparent_sheet_one_guide() {
    let sheet = RgbaImage::new(128, 64);
    let guides = GuidePositions::new(vec![64]);

    let cell = resolve_max_width(&sheet, &guides, 1, 64, 64);
    assert_eq!(cell, 64);

    let canvas = repack(&sheet, &guides, 1, 64, cell, SpriteSizing::Native);
    assert_eq!(canvas.dimensions(), (128, 64));
    assert!(canvas.pixels().all(|p| p[3] == 0));

    // Trimming a fully transparent canvas is a no-op
    let config = GridConfig::new(64, 1, 1).unwrap();
    let packed = process(&sheet, &guides, &config).unwrap();
    assert_eq!(packed.image.dimensions(), (128, 64));
    assert!(packed.placements.is_empty());
}

#[test]
fn test_empty_section_does_not_affect_width() {
    let mut sheet = RgbaImage::new(192, 32);
    fill(&mut sheet, 5, 0, 20, 32);
    fill(&mut sheet, 140, 0, 40, 32);
    let with_gap = GuidePositions::new(vec![64, 128]);

    let width = resolve_max_width(&sheet, &with_gap, 1, 32, 1);
    assert_eq!(width, 40);

    let canvas = repack(&sheet, &with_gap, 1, 32, width, SpriteSizing::Native);
    assert_eq!(canvas.width(), 120);
    // Middle cell stays empty
    assert!((40..80).all(|x| canvas.get_pixel(x, 10)[3] == 0));
}

#[test]
fn test_canvas_width_is_cell_times_sections() {
    let mut sheet = RgbaImage::new(300, 40);
    fill(&mut sheet, 10, 0, 70, 20);
    fill(&mut sheet, 200, 20, 30, 20);

    for guides in [vec![], vec![150], vec![50, 100, 150, 250], vec![299, 0]] {
        let guides = GuidePositions::new(guides);
        let cell = resolve_max_width(&sheet, &guides, 2, 20, 20);
        assert!(cell >= 20);
        let canvas = repack(&sheet, &guides, 2, 20, cell, SpriteSizing::Native);
        assert_eq!(canvas.width(), cell * guides.section_count() as u32);
        assert_eq!(canvas.height(), 40);
    }
}

#[test]
fn test_pipeline_idempotent_bytes() {
    let mut sheet = RgbaImage::new(200, 96);
    fill(&mut sheet, 3, 4, 25, 20);
    fill(&mut sheet, 60, 40, 50, 10);
    fill(&mut sheet, 150, 70, 33, 26);
    sheet.put_pixel(120, 33, Rgba([1, 2, 3, 77]));
    let guides = GuidePositions::new(vec![140, 50, 100]);
    let config = GridConfig { sprite_height: 32, num_columns: 3, num_rows: 3, resize_sprites: false };

    let first = process(&sheet, &guides, &config).unwrap();
    let second = process(&sheet, &guides, &config).unwrap();
    assert_eq!(digest(&first.image), digest(&second.image));
    assert_eq!(first.image.dimensions(), second.image.dimensions());

    let resized = config.with_resize(true);
    let third = process(&sheet, &guides, &resized).unwrap();
    let fourth = process(&sheet, &guides, &resized).unwrap();
    assert_eq!(digest(&third.image), digest(&fourth.image));
}

#[test]
fn test_column_change_discards_drags() {
    let mut session = EditorSession::new(GridConfig::default());
    session.press(64, 2);
    session.motion(90);
    session.release();
    assert_eq!(session.guides().as_slice(), &[0, 90, 128, 192]);

    assert!(session.apply_entries("64", "6", "4").unwrap());
    assert_eq!(session.guides().as_slice(), &[0, 64, 128, 192, 256, 320]);
}

#[test]
fn test_session_drag_changes_output() {
    let mut sheet = RgbaImage::new(128, 32);
    fill(&mut sheet, 10, 0, 20, 32);
    fill(&mut sheet, 70, 0, 20, 32);

    let config = GridConfig::new(32, 1, 1).unwrap();
    let mut session = EditorSession::with_guides(config, GuidePositions::new(vec![64]));
    session.set_image(sheet);
    session.set_trim(TrimMode::Disabled);

    let before = session.process().unwrap().placements.len();
    assert_eq!(before, 2);

    // Dragging the only guide past both sprites merges them into one section
    session.press(64, 0);
    session.motion(120);
    session.release();
    let packed = session.process().unwrap();
    assert_eq!(packed.placements.len(), 1);
    assert_eq!(packed.cell_width, 80);
}

#[test]
fn test_far_guide_matches_guide_at_edge() {
    let mut sheet = RgbaImage::new(64, 64);
    fill(&mut sheet, 7, 0, 50, 64);
    let config = GridConfig::new(64, 1, 1).unwrap();

    let far = process(&sheet, &GuidePositions::new(vec![20_000_000]), &config).unwrap();
    let edge = process(&sheet, &GuidePositions::new(vec![64]), &config).unwrap();
    assert_eq!(far.cell_width, 64);
    assert_eq!(digest(&far.image), digest(&edge.image));
}
