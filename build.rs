fn main() {
    // Host builds (tests, simulator) have no ESP-IDF toolchain to locate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
