/// Returns the default DRM render node for the host1x GPU.
/// Overridable with HOSTQ_DEVICE for boards that probe the card
/// at a different minor.
pub fn default_device_path() -> String {
    std::env::var("HOSTQ_DEVICE").unwrap_or_else(|_| "/dev/dri/card0".to_string())
}

/// Returns the platform name string.
pub fn platform_name() -> &'static str {
    #[cfg(target_os = "linux")]
    { "linux" }
    #[cfg(target_os = "android")]
    { "android" }
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    { "unknown" }
}
