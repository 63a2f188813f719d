mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{
    WHITE, add_colors, fade_to_black, hsv2rgb, offset_color, rainbow_hue, rgb_from_u32,
    rgb_to_u32, scale_color,
};

pub type Rgb = RGB8;
pub type Hsv = HSV;
