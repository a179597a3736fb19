use crate::bit_buffer::BitBuffer;
use crate::code_ecc::CodeEcc;
use crate::data_encoder;
use crate::error::QrError;
use crate::mask::Mask;

/// Module count of a side of the finder pattern, including its border.
const FINDER_PATTERN_SIZE: i32 = 7;

/// Width/height of the light quiet zone surrounding the 21x21 core (S6.5).
const QUIET_ZONE: i32 = 4;

/// Width/height of the Version-1 core, in modules.
const SIZE: i32 = 21;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// The canonical 7x7 finder pattern: an outer dark ring, a light ring, and a
/// dark 3x3 core (S4.6 step 1).
const FINDER_PATTERN: [[bool; 7]; 7] = [
    [true, true, true, true, true, true, true],
    [true, false, false, false, false, false, true],
    [true, false, true, true, true, false, true],
    [true, false, true, true, true, false, true],
    [true, false, true, true, true, false, true],
    [true, false, false, false, false, false, true],
    [true, true, true, true, true, true, true],
];

/// 32-entry masked BCH(15,5,7) format-information table, indexed by
/// `(ecl_bits << 3) | mask_index` (S6.4).
const FORMAT_INFO_TABLE: [u16; 32] = [
    0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0, 0x77C4, 0x72F3, 0x7DAA, 0x789D,
    0x662F, 0x6318, 0x6C41, 0x6976, 0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255, 0x0D0C, 0x083B,
    0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED,
];

/// A Version-1 QR Code symbol: a 21x21 grid of dark/light modules with a
/// 4-module quiet zone, built once per `(ecl, mask)` pair and never mutated
/// afterward (S3, S4.6).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    ecl: CodeEcc,
    mask: Mask,
    modules: Vec<bool>,
    dirty: Vec<bool>,
}

impl QrCode {
    /// Returns a QR Code symbol representing `text` at the given error
    /// correction level.
    ///
    /// Builds all 8 mask candidates and keeps the one with the lowest
    /// penalty score (S4.6.4); ties resolve to the lowest mask index.
    ///
    /// Returns `Err(QrError::CapacityExceeded)` if `text` does not fit the
    /// Version-1 byte-payload capacity of `ecl` (S6.2).
    pub fn encode(ecl: CodeEcc, text: &str) -> Result<Self, QrError> {
        let data = data_encoder::encode(ecl, text)?;

        let mut best: Option<Self> = None;
        let mut best_penalty = i32::MAX;
        for m in 0u8..8 {
            let candidate = Self::build(ecl, Mask::new(m), &data);
            let penalty = candidate.penalty_score();
            if penalty < best_penalty {
                best_penalty = penalty;
                best = Some(candidate);
            }
        }
        Ok(best.expect("at least one of the 8 masks is always tried"))
    }

    fn build(ecl: CodeEcc, mask: Mask, data: &BitBuffer) -> Self {
        let stride = (SIZE + 2 * QUIET_ZONE) as usize;
        let mut symbol = Self {
            ecl,
            mask,
            modules: vec![false; stride * stride],
            dirty: vec![false; stride * stride],
        };
        symbol.draw_finder_patterns();
        symbol.draw_separators();
        symbol.draw_timing_patterns();
        symbol.draw_format_info();
        symbol.draw_data(data);
        symbol
    }

    /// This symbol's error correction level.
    pub fn error_correction_level(&self) -> CodeEcc {
        self.ecl
    }

    /// The mask pattern chosen for this symbol, in 0..=7.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Width/height of the symbol's core, always 21 at Version 1.
    pub fn size(&self) -> i32 {
        SIZE
    }

    /// Width of the quiet zone on each side, always 4 at Version 1.
    pub fn quiet_zone(&self) -> i32 {
        QUIET_ZONE
    }

    /// Returns `true` for a dark module at `(x, y)`, where `(0, 0)` is the
    /// top-left core module and the quiet zone occupies `-4..0` and
    /// `21..25`. Coordinates outside `[-4, 24]` are treated as light (S6.1).
    pub fn module(&self, x: i32, y: i32) -> bool {
        let lo = -QUIET_ZONE;
        let hi = SIZE + QUIET_ZONE - 1;
        if x < lo || x > hi || y < lo || y > hi {
            return false;
        }
        self.get(x, y)
    }

    fn index(&self, x: i32, y: i32) -> usize {
        let stride = SIZE + 2 * QUIET_ZONE;
        ((y + QUIET_ZONE) * stride + (x + QUIET_ZONE)) as usize
    }

    fn get(&self, x: i32, y: i32) -> bool {
        self.modules[self.index(x, y)]
    }

    fn is_dirty(&self, x: i32, y: i32) -> bool {
        self.dirty[self.index(x, y)]
    }

    fn set(&mut self, x: i32, y: i32, v: bool) {
        let i = self.index(x, y);
        self.modules[i] = v;
        self.dirty[i] = true;
    }

    fn draw_finder_patterns(&mut self) {
        self.draw_2d_pattern(0, 0, &FINDER_PATTERN);
        self.draw_2d_pattern(SIZE - FINDER_PATTERN_SIZE, 0, &FINDER_PATTERN);
        self.draw_2d_pattern(0, SIZE - FINDER_PATTERN_SIZE, &FINDER_PATTERN);
    }

    fn draw_2d_pattern(&mut self, x: i32, y: i32, pattern: &[[bool; 7]; 7]) {
        for (dy, row) in pattern.iter().enumerate() {
            for (dx, &v) in row.iter().enumerate() {
                self.set(x + dx as i32, y + dy as i32, v);
            }
        }
    }

    fn draw_separators(&mut self) {
        // top-left
        self.draw_separator_vertical(FINDER_PATTERN_SIZE, 0);
        self.draw_separator_horizontal(0, FINDER_PATTERN_SIZE);

        // top-right
        self.draw_separator_vertical(SIZE - FINDER_PATTERN_SIZE - 1, 0);
        self.draw_separator_horizontal(SIZE - FINDER_PATTERN_SIZE - 1, FINDER_PATTERN_SIZE);

        // bottom-left
        self.draw_separator_vertical(FINDER_PATTERN_SIZE, SIZE - FINDER_PATTERN_SIZE - 1);
        self.draw_separator_horizontal(0, SIZE - FINDER_PATTERN_SIZE - 1);
    }

    fn draw_separator_vertical(&mut self, x: i32, y: i32) {
        for dy in 0..(FINDER_PATTERN_SIZE + 1) {
            self.set(x, y + dy, false);
        }
    }

    fn draw_separator_horizontal(&mut self, x: i32, y: i32) {
        for dx in 0..(FINDER_PATTERN_SIZE + 1) {
            self.set(x + dx, y, false);
        }
    }

    fn draw_timing_patterns(&mut self) {
        // first module of the run is dark (S4.6 step 3)
        let mut v = true;
        for i in (FINDER_PATTERN_SIZE + 1)..(SIZE - FINDER_PATTERN_SIZE - 1) {
            self.set(i, FINDER_PATTERN_SIZE - 1, v); // horizontal, row y=6
            self.set(FINDER_PATTERN_SIZE - 1, i, v); // vertical, column x=6
            v = !v;
        }
    }

    fn draw_format_info(&mut self) {
        let fi = FORMAT_INFO_TABLE[((self.ecl.format_bits() as usize) << 3) | self.mask.value() as usize];
        let bit = |i: u32| -> bool { (fi >> i) & 1 != 0 };

        // vertical copy beside the top-left finder, column x = finderPatternSize+1 = 8
        for i in 0..=5 {
            self.set(8, i, bit(i as u32));
        }
        // y = 6 is skipped (timing pattern)
        for i in 6..=7 {
            self.set(8, i + 1, bit(i as u32));
        }
        self.set(8, SIZE - FINDER_PATTERN_SIZE - 1, true); // always dark
        for i in 8..=14 {
            self.set(8, SIZE - FINDER_PATTERN_SIZE - 8 + i, bit(i as u32));
        }

        // horizontal copy on row y = finderPatternSize+1 = 8
        for i in 0..=7 {
            self.set(SIZE - 1 - i, 8, bit(i as u32));
        }
        self.set(FINDER_PATTERN_SIZE, 8, bit(8));
        // x = finderPatternSize-1 = 6 is skipped (timing pattern)
        for i in 9..=14 {
            self.set(14 - i, 8, bit(i as u32));
        }
    }

    /// Walks the zig-zag data path (S4.6.2), writing `data_bit XOR mask(x,y)`
    /// into every non-dirty cell until all of `data` has been placed.
    fn draw_data(&mut self, data: &BitBuffer) {
        let total = data.position();
        if total == 0 {
            return;
        }

        let mut dx: i32 = 0; // 0 = right column of the pair, -1 = left
        let mut x = SIZE - 1;
        let mut y = SIZE - 1;
        let mut direction = Direction::Up;

        for i in 0..total {
            let bit = data.bit_at(i);
            let masked = bit ^ self.mask.applies_at(x + dx, y);
            self.set(x + dx, y, masked);

            if i == total - 1 {
                break;
            }

            loop {
                if dx == 0 {
                    dx = -1;
                } else {
                    dx = 0;
                    match direction {
                        Direction::Up => {
                            if y > 0 {
                                y -= 1;
                            } else {
                                direction = Direction::Down;
                                x -= 2;
                            }
                        }
                        Direction::Down => {
                            if y < SIZE - 1 {
                                y += 1;
                            } else {
                                direction = Direction::Up;
                                x -= 2;
                            }
                        }
                    }
                }
                if x == 6 {
                    x -= 1;
                }
                if !self.is_dirty(x + dx, y) {
                    break;
                }
            }
        }
    }

    /// Total penalty score across all four criteria (S4.6.4). Lower is better.
    fn penalty_score(&self) -> i32 {
        self.penalty_n1() + self.penalty_n2() + self.penalty_n3() + self.penalty_n4()
    }

    fn penalty_n1(&self) -> i32 {
        self.penalty_n1_horizontal().max(self.penalty_n1_vertical())
    }

    fn penalty_n1_horizontal(&self) -> i32 {
        let weight = 3;
        let mut penalty = 0;
        for y in 0..SIZE {
            let mut last = self.get(0, y);
            let mut count = 1;
            for x in 1..SIZE {
                let v = self.get(x, y);
                if v != last {
                    count = 1;
                    last = v;
                } else {
                    count += 1;
                    if count == 5 {
                        penalty = penalty.max(weight);
                    } else if count > 6 {
                        penalty = penalty.max(weight + count - 5);
                    }
                }
            }
        }
        penalty
    }

    fn penalty_n1_vertical(&self) -> i32 {
        let weight = 3;
        let mut penalty = 0;
        for x in 0..SIZE {
            let mut last = self.get(x, 0);
            let mut count = 1;
            for y in 1..SIZE {
                let v = self.get(x, y);
                if v != last {
                    count = 1;
                    last = v;
                } else {
                    count += 1;
                    if count == 5 {
                        penalty = penalty.max(weight);
                    } else if count > 6 {
                        penalty = penalty.max(weight + count - 5);
                    }
                }
            }
        }
        penalty
    }

    fn penalty_n2(&self) -> i32 {
        let weight = 3;
        let mut count = 0;
        for y in 1..SIZE {
            for x in 1..SIZE {
                let top_left = self.get(x - 1, y - 1);
                let above = self.get(x, y - 1);
                let left = self.get(x - 1, y);
                let current = self.get(x, y);
                if current == left && current == above && current == top_left {
                    count += 1;
                }
            }
        }
        count * weight
    }

    fn penalty_n3(&self) -> i32 {
        let weight = 40;

        for y in 0..SIZE {
            let mut window: u16 = 0;
            for x in 0..SIZE {
                window = (window << 1) | u16::from(self.get(x, y));
                match window & 0x7FF {
                    0x05D | 0x5D0 => return weight,
                    _ => {
                        if x == SIZE - 1 && (window & 0x7F) == 0x5D {
                            return weight;
                        }
                    }
                }
            }
        }

        for x in 0..SIZE {
            let mut window: u16 = 0;
            for y in 0..SIZE {
                window = (window << 1) | u16::from(self.get(x, y));
                match window & 0x7FF {
                    0x05D | 0x5D0 => return weight,
                    _ => {
                        if y == SIZE - 1 && (window & 0x7F) == 0x5D {
                            return weight;
                        }
                    }
                }
            }
        }

        0
    }

    fn penalty_n4(&self) -> i32 {
        let weight = 10;
        let total_modules = SIZE * SIZE;
        let mut dark = 0;
        for y in 0..SIZE {
            for x in 0..SIZE {
                if self.get(x, y) {
                    dark += 1;
                }
            }
        }
        let ratio = f64::from(dark) / f64::from(total_modules);
        let diff_percent = (50.0 - ratio * 100.0).abs();
        weight * (diff_percent / 5.0).ceil() as i32
    }
}
