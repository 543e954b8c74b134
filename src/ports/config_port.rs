//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, key: &str) -> Option<String>;
}
