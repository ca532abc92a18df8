//! 5x7 bitmap font: glyph table, character folding, and the `R8Unorm` atlas.

/// Atlas layout: 16 columns x 6 rows of glyph cells, ASCII 32..=127.
const ATLAS_COLS: u32 = 16;
const ATLAS_ROWS: u32 = 6;
const FIRST_CHAR: u32 = 32;
const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

/// Advance of one glyph at scale 1, in pixels.
pub const GLYPH_PX_W: f32 = 6.0;
/// Line height of one glyph at scale 1, in pixels.
pub const GLYPH_PX_H: f32 = 8.0;

/// Map a character to one the ASCII atlas can draw. Latin accents lose their mark;
/// anything else unprintable becomes `?`.
pub fn fold_glyph(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        '¿' | '¡' => ' ',
        '—' | '–' => '-',
        c if (' '..='~').contains(&c) => c,
        _ => '?',
    }
}

/// Width in pixels of `text` drawn at `scale`.
pub fn text_width(text: &str, scale: f32) -> f32 {
    text.chars().count() as f32 * GLYPH_PX_W * scale
}

/// Atlas UV rect `[u0, v0, u1, v1]` for a character, or None for blank glyphs.
pub fn glyph_uv(ch: char) -> Option<[f32; 4]> {
    let index = fold_glyph(ch) as u32 - FIRST_CHAR;
    if GLYPHS[index as usize] == 0 {
        return None;
    }
    let col = (index % ATLAS_COLS) as f32;
    let row = (index / ATLAS_COLS) as f32;
    let (cols, rows) = (ATLAS_COLS as f32, ATLAS_ROWS as f32);
    Some([col / cols, row / rows, (col + 1.0) / cols, (row + 1.0) / rows])
}

/// Whether pixel (`x`, `y`) of a packed glyph is lit. Row 0 is the top.
fn glyph_pixel(glyph: u64, x: u32, y: u32) -> bool {
    let row = (glyph >> (GLYPH_W * (GLYPH_H - 1 - y))) & 0x1F;
    (row >> (GLYPH_W - 1 - x)) & 1 != 0
}

/// Rasterize the font into an `R8Unorm` atlas. Returns (pixels, width, height).
pub fn generate_font_atlas() -> (Vec<u8>, u32, u32) {
    let cell_w = GLYPH_PX_W as u32;
    let cell_h = GLYPH_PX_H as u32;
    let atlas_w = ATLAS_COLS * cell_w;
    let atlas_h = ATLAS_ROWS * cell_h;
    let mut pixels = vec![0u8; (atlas_w * atlas_h) as usize];

    for (index, &glyph) in GLYPHS.iter().enumerate() {
        let index = index as u32;
        let origin_x = (index % ATLAS_COLS) * cell_w;
        let origin_y = (index / ATLAS_COLS) * cell_h;
        for y in 0..GLYPH_H {
            for x in 0..GLYPH_W {
                if glyph_pixel(glyph, x, y) {
                    pixels[((origin_y + y) * atlas_w + origin_x + x) as usize] = 255;
                }
            }
        }
    }

    (pixels, atlas_w, atlas_h)
}

/// One glyph per ASCII code from 32. Seven 5-bit rows packed top row first;
/// within a row the high bit is the leftmost pixel. 127 is a solid block.
#[rustfmt::skip]
const GLYPHS: [u64; 96] = [
    //  !"#$%&'
    0x000000000, 0x108421004, 0x294000000, 0x2BEA57D40, 0x11F4717C4, 0x632222263, 0x22944564D, 0x108000000,
    // ()*+,-./
    0x088842082, 0x208210888, 0x12AEFBAA4, 0x0084F9080, 0x000000088, 0x0000F8000, 0x000000004, 0x042222210,
    // 01234567
    0x3A33AE62E, 0x11842108E, 0x3A213221F, 0x3A213062E, 0x08CA97C42, 0x7E1E0862E, 0x1910F462E, 0x7C2222108,
    // 89:;<=>?
    0x3A317462E, 0x3A317844C, 0x000400080, 0x000400088, 0x088882082, 0x001F07C00, 0x208208888, 0x3A2111004,
    // @ABCDEFG
    0x3A37ADE0E, 0x3A31FC631, 0x7A31F463E, 0x3A308422E, 0x7A318C63E, 0x7E10F421F, 0x7E10F4210, 0x3A30BC62F,
    // HIJKLMNO
    0x4631FC631, 0x38842108E, 0x1C4210A4C, 0x4654C5251, 0x42108421F, 0x4775AC631, 0x47359C631, 0x3A318C62E,
    // PQRSTUVW
    0x7A31F4210, 0x3A318D64D, 0x7A31F5251, 0x3A307062E, 0x7C8421084, 0x46318C62E, 0x46318A944, 0x4631AD771,
    // XYZ[\]^_
    0x462A22A31, 0x462A21084, 0x7C222221F, 0x39084210E, 0x420820821, 0x38421084E, 0x115100000, 0x00000001F,
    // `abcdefg
    0x208000000, 0x000E0BE2F, 0x421E8C63E, 0x000E8C22E, 0x042F8C62F, 0x000E8FE0E, 0x191E42108, 0x000F8BC2E,
    // hijklmno
    0x421E8C631, 0x100C2108E, 0x080610A4C, 0x4212A6292, 0x30842108E, 0x001AAD6B1, 0x001E8C631, 0x000E8C62E,
    // pqrstuvw
    0x001E8FA10, 0x000F8BC21, 0x0016CC210, 0x000F8383E, 0x211E42126, 0x00118C66D, 0x00118C544, 0x0011AD6AA,
    // xyz{|}~ 
    0x001151151, 0x00118BC2E, 0x001F1111F, 0x088441082, 0x108421084, 0x208411088, 0x011510000, 0x7FFFFFFFF,
];
