use super::*;

/// # Safety
/// Each test uses its own prefix, so no two tests touch the same variables.
unsafe fn clear_env(prefix: &str) {
    for suffix in ["BASE_URL", "RENDER_PATH", "IMAGE_TARGET", "LOOKUP_TIMEOUT_SECS", "CONNECT_TIMEOUT_SECS"] {
        unsafe { std::env::remove_var(format!("{prefix}_{suffix}")) };
    }
}

// =============================================================
// Presets
// =============================================================

#[test]
fn bb_preset_matches_stock_page() {
    let cfg = WidgetConfig::bb("http://localhost:8080/");
    assert_eq!(cfg.name, "bb");
    assert_eq!(cfg.render_path, "/bb");
    assert_eq!(cfg.image_target, "bbImg");
    assert_eq!(cfg.initial_view.center, Coordinate::new(60.14, 10.25));
    assert_eq!(cfg.initial_view.zoom, 11);
    assert!(cfg.tile_layer.url.contains("opencache.statkart.no"));
}

#[test]
fn blaner_preset_differs_only_in_endpoint_and_target() {
    let bb = WidgetConfig::bb("http://localhost:8080/");
    let blaner = WidgetConfig::blaner("http://localhost:8080/");
    assert_eq!(blaner.render_path, "/blaner");
    assert_eq!(blaner.image_target, "blanerImg");
    assert_eq!(blaner.initial_view, bb.initial_view);
    assert_eq!(blaner.tile_layer, bb.tile_layer);
    assert_eq!(blaner.timeouts, bb.timeouts);
}

#[test]
fn base_rejects_unparseable_url() {
    let cfg = WidgetConfig::bb("not a url");
    assert!(matches!(cfg.base(), Err(PickError::InvalidBaseUrl { .. })));
}

// =============================================================
// Deserialization
// =============================================================

#[test]
fn deserialize_fills_defaults() {
    let cfg: WidgetConfig = serde_json::from_value(serde_json::json!({
        "name": "custom",
        "base_url": "https://maps.example.test/",
        "render_path": "/custom",
        "image_target": "customImg"
    }))
    .unwrap();
    assert_eq!(cfg.initial_view, InitialView::default());
    assert_eq!(cfg.tile_layer, TileLayer::default());
    assert_eq!(cfg.timeouts, LookupTimeouts::default());
}

// =============================================================
// Environment
// =============================================================

#[test]
fn from_env_requires_base_url() {
    unsafe { clear_env("PICKMAP_T1") };
    let err = WidgetConfig::from_env("PICKMAP_T1").unwrap_err();
    assert!(matches!(err, PickError::ConfigParse(msg) if msg.contains("PICKMAP_T1_BASE_URL")));
}

#[test]
fn from_env_derives_defaults_from_prefix() {
    unsafe {
        clear_env("BB");
        std::env::set_var("BB_BASE_URL", "http://localhost:8080/");
    }
    let cfg = WidgetConfig::from_env("BB").unwrap();
    assert_eq!(cfg, WidgetConfig::bb("http://localhost:8080/"));
    unsafe { clear_env("BB") };
}

#[test]
fn from_env_parses_overrides() {
    unsafe {
        clear_env("PICKMAP_T3");
        std::env::set_var("PICKMAP_T3_BASE_URL", "https://example.test/");
        std::env::set_var("PICKMAP_T3_RENDER_PATH", "/los");
        std::env::set_var("PICKMAP_T3_IMAGE_TARGET", "losImg");
        std::env::set_var("PICKMAP_T3_LOOKUP_TIMEOUT_SECS", "5");
        std::env::set_var("PICKMAP_T3_CONNECT_TIMEOUT_SECS", " 2 ");
    }
    let cfg = WidgetConfig::from_env("PICKMAP_T3").unwrap();
    assert_eq!(cfg.name, "pickmap_t3");
    assert_eq!(cfg.render_path, "/los");
    assert_eq!(cfg.image_target, "losImg");
    assert_eq!(cfg.timeouts, LookupTimeouts { request_secs: 5, connect_secs: 2 });
    unsafe { clear_env("PICKMAP_T3") };
}

#[test]
fn from_env_rejects_bad_timeout() {
    unsafe {
        clear_env("PICKMAP_T4");
        std::env::set_var("PICKMAP_T4_BASE_URL", "https://example.test/");
        std::env::set_var("PICKMAP_T4_LOOKUP_TIMEOUT_SECS", "soon");
    }
    let err = WidgetConfig::from_env("PICKMAP_T4").unwrap_err();
    assert!(matches!(err, PickError::ConfigParse(msg) if msg.contains("soon")));
    unsafe { clear_env("PICKMAP_T4") };
}

#[test]
fn from_env_rejects_bad_base_url() {
    unsafe {
        clear_env("PICKMAP_T5");
        std::env::set_var("PICKMAP_T5_BASE_URL", "::nope::");
    }
    let err = WidgetConfig::from_env("PICKMAP_T5").unwrap_err();
    assert!(matches!(err, PickError::InvalidBaseUrl { .. }));
    unsafe { clear_env("PICKMAP_T5") };
}
