fn main() {
    // Only the device build needs the esp-idf environment propagated.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
