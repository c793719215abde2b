/// Data masking and penalty-based mask selection
use crate::models::{BitMatrix, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

const FINDER_LIKE: [[bool; 11]; 2] = [
    [
        true, false, true, true, true, false, true, false, false, false, false,
    ],
    [
        false, false, false, false, true, false, true, true, true, false, true,
    ],
];

/// XOR every non-function module with the mask formula
pub fn apply_mask(modules: &mut BitMatrix, function: &BitMatrix, mask: MaskPattern) {
    for y in 0..modules.height() {
        for x in 0..modules.width() {
            if !function.get(x, y) && mask.is_masked(x, y) {
                modules.toggle(x, y);
            }
        }
    }
}

/// Sum of the four standard penalty rules
pub fn penalty_score(modules: &BitMatrix) -> u32 {
    run_penalty(modules)
        + block_penalty(modules)
        + finder_penalty(modules)
        + balance_penalty(modules)
}

fn line(modules: &BitMatrix, index: usize, horizontal: bool) -> Vec<bool> {
    let size = modules.width();
    (0..size)
        .map(|i| {
            if horizontal {
                modules.get(i, index)
            } else {
                modules.get(index, i)
            }
        })
        .collect()
}

fn lines(modules: &BitMatrix) -> impl Iterator<Item = Vec<bool>> + '_ {
    let size = modules.width();
    (0..size)
        .map(move |i| line(modules, i, true))
        .chain((0..size).map(move |i| line(modules, i, false)))
}

/// N1: runs of five or more same-colour modules in a row or column
fn run_penalty(modules: &BitMatrix) -> u32 {
    let mut penalty = 0;
    for cells in lines(modules) {
        let mut run = 1;
        for i in 1..=cells.len() {
            if i < cells.len() && cells[i] == cells[i - 1] {
                run += 1;
                continue;
            }
            if run >= 5 {
                penalty += PENALTY_N1 + (run - 5);
            }
            run = 1;
        }
    }
    penalty
}

/// N2: 2x2 blocks of one colour
fn block_penalty(modules: &BitMatrix) -> u32 {
    let size = modules.width();
    let mut penalty = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let c = modules.get(x, y);
            if c == modules.get(x + 1, y)
                && c == modules.get(x, y + 1)
                && c == modules.get(x + 1, y + 1)
            {
                penalty += PENALTY_N2;
            }
        }
    }
    penalty
}

/// N3: 1:1:3:1:1 finder-like sequences with four light modules on one side
fn finder_penalty(modules: &BitMatrix) -> u32 {
    let mut penalty = 0;
    for cells in lines(modules) {
        for window in cells.windows(11) {
            if FINDER_LIKE.iter().any(|pattern| window == pattern) {
                penalty += PENALTY_N3;
            }
        }
    }
    penalty
}

/// N4: deviation of the dark ratio from 50%, in whole 5% steps
fn balance_penalty(modules: &BitMatrix) -> u32 {
    let total = modules.width() * modules.height();
    if total == 0 {
        return 0;
    }
    let dark = modules.count_ones();
    let percent = dark * 100 / total;
    let deviation = percent.abs_diff(50) as u32;
    (deviation / 5) * PENALTY_N4
}
