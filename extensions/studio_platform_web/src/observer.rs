//! IntersectionObserver options

/// `rootMargin` extending the viewport by `margin` pixels above and below
pub fn root_margin(margin: f32) -> String {
    let margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
    format!("{margin}px 0px {margin}px 0px")
}

/// Observers are shared between elements with the same margin
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn same_margin(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_margin() {
        assert_eq!(root_margin(100.0), "100px 0px 100px 0px");
        assert_eq!(root_margin(12.5), "12.5px 0px 12.5px 0px");
        assert_eq!(root_margin(0.0), "0px 0px 0px 0px");
    }

    #[test]
    fn test_root_margin_is_never_negative() {
        assert_eq!(root_margin(-5.0), "0px 0px 0px 0px");
        assert_eq!(root_margin(f32::NAN), "0px 0px 0px 0px");
    }

    #[test]
    fn test_same_margin() {
        assert!(same_margin(100.0, 100.0));
        assert!(!same_margin(100.0, 100.5));
    }
}
