/// One entry of the launcher strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherApp {
    pub name: String,
    /// Icon asset path, resolved by the renderer
    pub icon: String,
}

impl LauncherApp {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }
}

/// The kiosk's stock app list, in display order
pub fn default_apps() -> Vec<LauncherApp> {
    vec![
        LauncherApp::new("Browser", "assets/img/browser.svg"),
        LauncherApp::new("Navigation", "assets/img/location.svg"),
        LauncherApp::new("Voice Assistant", "assets/img/mic.svg"),
        LauncherApp::new("Teleprompter", "assets/img/teleprompter.svg"),
        LauncherApp::new("Camera", "assets/img/camera.svg"),
    ]
}
