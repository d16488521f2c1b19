//! Configuration access port trait.

/// Section/key lookup over a configuration source.
///
/// Typed getters return `default` for absent or unparseable values; call
/// the validators in `domain::config_validation` first when a bad value
/// must be reported instead.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
