pub mod matrix;
pub mod symbol;

pub use matrix::BitMatrix;
pub use symbol::{ECLevel, MaskPattern, QrSymbol, Truncation, Version};
