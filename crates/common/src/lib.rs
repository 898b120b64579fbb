//! Shared building blocks for the registry crates: logging setup,
//! runtime environment checks and the small JSON bodies every route speaks.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
