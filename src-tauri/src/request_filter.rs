//! Passive request blocking for the shared profile.
//!
//! A request is blocked when its URL contains any denylisted substring. The
//! same ordered list drives both the navigation handler on the Rust side and
//! the initialization script that guards in-page requests.

pub const DEFAULT_BLOCKED_PATTERNS: &[&str] = &[
    "doubleclick",
    "fbevents.js",
    "google-analytics.com",
    "googletagmanager.com",
    "connect.facebook.net/signals",
    "facebook.com/tr",
    "pixel.facebook.com",
    "an.facebook.com",
];

const PATTERNS_PLACEHOLDER: &str = "__BLOCKED_PATTERNS__";

const BLOCKING_SCRIPT_TEMPLATE: &str = r#"(function () {
  if (window.__messengerProRequestFilter) {
    return;
  }
  window.__messengerProRequestFilter = true;

  const blocked = __BLOCKED_PATTERNS__;
  const isBlocked = (value) => {
    if (value === undefined || value === null) {
      return false;
    }
    const url = String(value);
    return blocked.some((pattern) => url.includes(pattern));
  };

  const originalFetch = window.fetch;
  if (typeof originalFetch === "function") {
    window.fetch = function (input, init) {
      const url = typeof input === "string" ? input : (input && input.url) || "";
      if (isBlocked(url)) {
        return Promise.reject(new TypeError("request blocked"));
      }
      return originalFetch.call(this, input, init);
    };
  }

  const originalOpen = XMLHttpRequest.prototype.open;
  const originalSend = XMLHttpRequest.prototype.send;
  XMLHttpRequest.prototype.open = function (method, url) {
    this.__messengerProBlocked = isBlocked(url);
    return originalOpen.apply(this, arguments);
  };
  XMLHttpRequest.prototype.send = function () {
    if (this.__messengerProBlocked) {
      this.abort();
      return;
    }
    return originalSend.apply(this, arguments);
  };

  if (typeof navigator.sendBeacon === "function") {
    const originalBeacon = navigator.sendBeacon.bind(navigator);
    navigator.sendBeacon = function (url, data) {
      if (isBlocked(url)) {
        return false;
      }
      return originalBeacon(url, data);
    };
  }

  for (const proto of [
    HTMLScriptElement.prototype,
    HTMLImageElement.prototype,
    HTMLIFrameElement.prototype,
  ]) {
    const descriptor = Object.getOwnPropertyDescriptor(proto, "src");
    if (!descriptor || typeof descriptor.set !== "function") {
      continue;
    }
    Object.defineProperty(proto, "src", {
      configurable: true,
      enumerable: descriptor.enumerable,
      get: descriptor.get,
      set(value) {
        if (isBlocked(value)) {
          return;
        }
        descriptor.set.call(this, value);
      },
    });
  }
})();
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision<'a> {
    Allow,
    Block { pattern: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFilter {
    patterns: Vec<String>,
}

impl RequestFilter {
    /// Blank patterns are ignored; duplicates keep their first position.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() || normalized.iter().any(|existing| existing == pattern) {
                continue;
            }
            normalized.push(pattern.to_string());
        }
        Self {
            patterns: normalized,
        }
    }

    pub fn with_defaults(extra_patterns: &[String]) -> Self {
        Self::new(
            DEFAULT_BLOCKED_PATTERNS
                .iter()
                .copied()
                .chain(extra_patterns.iter().map(String::as_str)),
        )
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn decide(&self, url: &str) -> FilterDecision<'_> {
        self.patterns
            .iter()
            .find(|pattern| url.contains(pattern.as_str()))
            .map(|pattern| FilterDecision::Block {
                pattern: pattern.as_str(),
            })
            .unwrap_or(FilterDecision::Allow)
    }

    pub fn is_blocked(&self, url: &str) -> bool {
        matches!(self.decide(url), FilterDecision::Block { .. })
    }
}

pub fn render_blocking_script(filter: &RequestFilter) -> String {
    let patterns_json =
        serde_json::to_string(filter.patterns()).unwrap_or_else(|_| "[]".to_string());
    BLOCKING_SCRIPT_TEMPLATE.replace(PATTERNS_PLACEHOLDER, &patterns_json)
}
