//! Ring driver, MY9221 protocol encoder and animations.

pub mod circular_led;
pub mod my9221;
pub mod ring_patterns;
