#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod config;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod logging;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod motion;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
