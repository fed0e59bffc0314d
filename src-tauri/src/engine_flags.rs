use std::env;

use crate::EXTRA_ENGINE_FLAGS_ENV;

/// Chromium switches that keep the embedded engine lean: one renderer
/// process, a capped script heap and no background networking.
pub const ENGINE_FLAGS: &[&str] = &[
    "--enable-gpu-rasterization",
    "--enable-zero-copy",
    "--ignore-gpu-blocklist",
    "--enable-features=VaapiVideoDecoder,CanvasOopRasterization",
    "--renderer-process-limit=1",
    "--js-flags=--max_old_space_size=256",
    "--discard-unused-memory",
    "--disable-logging",
    "--disable-background-networking",
    "--disable-features=msWebOOUI,msPdfOOUI,msSmartScreenProtection",
];

pub(crate) fn compose_browser_args(extra_flags: Option<&str>) -> String {
    let mut args: Vec<String> = ENGINE_FLAGS.iter().map(|flag| flag.to_string()).collect();
    if let Some(extra) = extra_flags {
        for flag in extra.split_whitespace() {
            if !args.iter().any(|existing| existing == flag) {
                args.push(flag.to_string());
            }
        }
    }
    args.join(" ")
}

pub fn engine_browser_args() -> String {
    let extra = env::var(EXTRA_ENGINE_FLAGS_ENV).ok();
    compose_browser_args(extra.as_deref())
}
