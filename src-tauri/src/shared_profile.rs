use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tauri::{webview::PlatformWebview, AppHandle, WebviewWindow, WebviewWindowBuilder, Wry};
use url::Url;

use crate::{
    append_desktop_log, engine_flags, popup_windows,
    request_filter::{self, FilterDecision, RequestFilter},
    runtime_paths,
    shell_settings::{self, ShellSettings},
};

/// Answer given to camera, microphone, notification and similar page prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Grant,
    Deny,
}

/// Browsing profile shared by the root window and every popup. Built once
/// before the first window and never mutated afterwards.
#[derive(Debug)]
pub struct SharedProfile {
    pub data_dir: PathBuf,
    pub start_url: String,
    pub user_agent: String,
    pub filter: RequestFilter,
    pub blocking_script: String,
    pub browser_args: String,
}

impl SharedProfile {
    pub fn build(config_dir: &Path, settings: &ShellSettings) -> Result<Self, String> {
        let data_dir = runtime_paths::webview_data_dir(config_dir);
        runtime_paths::ensure_dir(&data_dir)?;

        let filter = RequestFilter::with_defaults(&settings.extra_blocked_patterns);
        let blocking_script = request_filter::render_blocking_script(&filter);

        Ok(Self {
            data_dir,
            start_url: shell_settings::resolve_start_url(settings),
            user_agent: shell_settings::resolve_user_agent(settings),
            filter,
            blocking_script,
            browser_args: engine_flags::engine_browser_args(),
        })
    }

    pub fn start_url(&self) -> Result<Url, String> {
        Url::parse(&self.start_url)
            .map_err(|error| format!("Invalid start URL {}: {}", self.start_url, error))
    }

    /// Every page request is granted unless the requesting page is on the denylist.
    pub fn decide_permission(&self, requesting_url: Option<&str>) -> PermissionDecision {
        match requesting_url {
            Some(url) if self.filter.is_blocked(url) => PermissionDecision::Deny,
            _ => PermissionDecision::Grant,
        }
    }

    pub fn allows_navigation<F>(&self, url: &Url, log: F) -> bool
    where
        F: Fn(&str),
    {
        match self.filter.decide(url.as_str()) {
            FilterDecision::Allow => true,
            FilterDecision::Block { pattern } => {
                log(&format!("blocked navigation to {url} (matched '{pattern}')"));
                false
            }
        }
    }
}

/// Applies the shared engine settings, request blocking and popup handling
/// to a window builder. Root and popup windows both go through here.
pub(crate) fn apply_shared_profile<'a>(
    builder: WebviewWindowBuilder<'a, Wry, AppHandle>,
    app_handle: &AppHandle,
    profile: &Arc<SharedProfile>,
) -> WebviewWindowBuilder<'a, Wry, AppHandle> {
    let navigation_profile = Arc::clone(profile);
    let popup_profile = Arc::clone(profile);
    let popup_app = app_handle.clone();

    let builder = builder
        .user_agent(&profile.user_agent)
        .data_directory(profile.data_dir.clone())
        .initialization_script(&profile.blocking_script)
        .on_navigation(move |url| navigation_profile.allows_navigation(url, append_desktop_log))
        .on_new_window(move |url, features| {
            popup_windows::open_popup_window(&popup_app, &popup_profile, url, features)
        });

    #[cfg(target_os = "windows")]
    let builder = builder.additional_browser_args(&profile.browser_args);

    builder
}

/// Installs the permission handler on a built window. Permission requests are
/// only reachable through the native webview, which exists after `build()`.
pub(crate) fn grant_page_permissions(window: &WebviewWindow, profile: &Arc<SharedProfile>) {
    let profile = Arc::clone(profile);
    let label = window.label().to_string();
    let handler_label = label.clone();
    let result = window.with_webview(move |webview| {
        if let Err(error) = install_permission_handler(webview, profile) {
            append_desktop_log(&format!(
                "failed to install permission handler for {handler_label}: {error}"
            ));
        }
    });
    if let Err(error) = result {
        append_desktop_log(&format!(
            "failed to reach webview of {label} for permission handling: {error}"
        ));
    }
}

#[cfg(target_os = "linux")]
fn install_permission_handler(
    webview: PlatformWebview,
    profile: Arc<SharedProfile>,
) -> Result<(), String> {
    use webkit2gtk::{PermissionRequestExt, WebViewExt};

    webview.inner().connect_permission_request(move |view, request| {
        let uri = view.uri();
        match profile.decide_permission(uri.as_deref()) {
            PermissionDecision::Grant => request.allow(),
            PermissionDecision::Deny => request.deny(),
        }
        true
    });
    Ok(())
}

#[cfg(target_os = "windows")]
fn install_permission_handler(
    webview: PlatformWebview,
    profile: Arc<SharedProfile>,
) -> Result<(), String> {
    use webview2_com::{
        take_pwstr,
        Microsoft::Web::WebView2::Win32::{
            COREWEBVIEW2_PERMISSION_STATE_ALLOW, COREWEBVIEW2_PERMISSION_STATE_DENY,
        },
        PermissionRequestedEventHandler,
    };
    use windows::core::PWSTR;

    let core = unsafe { webview.controller().CoreWebView2() }
        .map_err(|error| format!("failed to access WebView2 core: {error}"))?;
    let handler = PermissionRequestedEventHandler::create(Box::new(move |_, args| {
        let Some(args) = args else {
            return Ok(());
        };
        let mut uri = PWSTR::null();
        unsafe { args.Uri(&mut uri)? };
        let uri = take_pwstr(uri);
        let state = match profile.decide_permission(Some(&uri)) {
            PermissionDecision::Grant => COREWEBVIEW2_PERMISSION_STATE_ALLOW,
            PermissionDecision::Deny => COREWEBVIEW2_PERMISSION_STATE_DENY,
        };
        unsafe { args.SetState(state) }
    }));

    let mut token = 0;
    unsafe { core.add_PermissionRequested(&handler, &mut token) }
        .map_err(|error| format!("failed to register permission handler: {error}"))
}

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
fn install_permission_handler(
    _webview: PlatformWebview,
    _profile: Arc<SharedProfile>,
) -> Result<(), String> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_creates_data_dir_and_default_filter() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let profile =
            SharedProfile::build(temp.path(), &ShellSettings::default()).expect("build profile");

        assert!(profile.data_dir.is_dir());
        assert!(profile.data_dir.starts_with(temp.path()));
        assert!(profile.filter.is_blocked("https://x.doubleclick.net/y"));
        assert!(profile.blocking_script.contains("\"fbevents.js\""));
        assert!(profile.browser_args.contains("--renderer-process-limit=1"));
    }

    #[test]
    fn build_appends_configured_patterns() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let settings = ShellSettings {
            extra_blocked_patterns: vec!["telemetry.example".to_string()],
            ..ShellSettings::default()
        };
        let profile = SharedProfile::build(temp.path(), &settings).expect("build profile");
        assert!(profile.filter.is_blocked("https://telemetry.example/collect"));
        assert!(profile.blocking_script.contains("telemetry.example"));
    }

    #[test]
    fn allows_navigation_rejects_denylisted_urls() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let profile =
            SharedProfile::build(temp.path(), &ShellSettings::default()).expect("build profile");

        let site = Url::parse("https://www.messenger.com/t/1").expect("parse url");
        assert!(profile.allows_navigation(&site, |_| {}));
        let tracker = Url::parse("https://www.facebook.com/tr?id=1").expect("parse url");
        let logged = std::cell::RefCell::new(Vec::new());
        assert!(!profile.allows_navigation(&tracker, |line| {
            logged.borrow_mut().push(line.to_string())
        }));
        assert_eq!(
            logged.borrow().as_slice(),
            ["blocked navigation to https://www.facebook.com/tr?id=1 (matched 'facebook.com/tr')"]
        );
    }

    #[test]
    fn page_permissions_are_granted_for_the_site_and_its_call_windows() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let profile =
            SharedProfile::build(temp.path(), &ShellSettings::default()).expect("build profile");

        assert_eq!(
            profile.decide_permission(Some("https://www.messenger.com/groupcall/ROOM:1")),
            PermissionDecision::Grant
        );
        assert_eq!(profile.decide_permission(None), PermissionDecision::Grant);
    }

    #[test]
    fn page_permissions_are_denied_for_denylisted_pages() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let settings = ShellSettings {
            extra_blocked_patterns: vec!["ads.example".to_string()],
            ..ShellSettings::default()
        };
        let profile = SharedProfile::build(temp.path(), &settings).expect("build profile");

        assert_eq!(
            profile.decide_permission(Some("https://ads.example/frame")),
            PermissionDecision::Deny
        );
    }
}
