//! Grove Circular LED firmware — Main Entry Point
//!
//! ```text
//!   RingConfig ──▶ RingAnimator ──tick──▶ RingCommand ──▶ LedRing ──▶ EspGpio
//! ```
//!
//! Claims the ring pins, then runs the configured animation forever. A
//! failed frame is logged and re-sent on the next tick.
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::FreeRtos;
use log::{info, warn};

use ledring::LedRing;
use ledring::adapters::esp_gpio::EspGpio;
use ledring::config::RingConfig;
use ledring::drivers::ring_patterns::RingAnimator;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ledring v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = RingConfig::default();
    config.validate().context("built-in configuration")?;

    // ── 3. Claim the ring ─────────────────────────────────────
    let mut gpio = EspGpio::new();
    let mut ring = LedRing::claim(&mut gpio, config.data_pin, config.clock_pin)
        .context("claiming ring pins")?;
    ring.clear().context("blanking ring")?;
    info!(
        "{} ready on data=GPIO{} clock=GPIO{}, animation {:?}",
        ring.name(),
        config.data_pin,
        config.clock_pin,
        config.animation
    );

    // ── 4. Animation loop ─────────────────────────────────────
    let mut animator = RingAnimator::new();
    animator.set_pattern(config.animation);
    loop {
        if let Some(command) = animator.tick(config.tick_interval_ms) {
            if let Err(e) = ring.apply(command) {
                warn!("ring update failed, retrying next tick: {}", e);
                animator.invalidate();
            }
        }
        FreeRtos::delay_ms(config.tick_interval_ms);
    }
}
