//! `cypress.config.*` → `playwright.config.*`

use pwmigrate_ast::{find_all, named_args, node_text, AdapterRegistry, LanguageId, Node};
use tracing::debug;

use super::property;
use crate::core::error::Result;

/// Source text of the direct property `name`, if present
fn get(object: &Node, name: &str, source: &str) -> Option<String> {
    property(object, name, source).map(|v| node_text(&v, source).to_string())
}

/// Settings read from a Cypress config, kept as source text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CypressConfig {
    pub base_url: Option<String>,
    pub viewport_width: Option<String>,
    pub viewport_height: Option<String>,
    pub default_timeout: Option<String>,
    pub video: Option<String>,
    pub screenshot_on_failure: Option<String>,
    pub retries: Option<String>,
    pub spec_pattern: Option<String>,
}

impl CypressConfig {
    /// Read settings from the object passed to the first `defineConfig(…)`
    pub fn extract(root: Node, source: &str) -> Self {
        let mut config = Self::default();
        let define_config = find_all(root, |n| {
            n.kind() == "call_expression"
                && n.child_by_field_name("function")
                    .is_some_and(|f| node_text(&f, source) == "defineConfig")
        });
        let Some(object) = define_config
            .first()
            .and_then(|call| named_args(call).into_iter().find(|a| a.kind() == "object"))
        else {
            debug!("no defineConfig object found, using defaults");
            return config;
        };

        config.base_url = get(&object, "baseUrl", source);
        config.viewport_width = get(&object, "viewportWidth", source);
        config.viewport_height = get(&object, "viewportHeight", source);
        config.default_timeout = get(&object, "defaultCommandTimeout", source);
        config.video = get(&object, "video", source);
        config.screenshot_on_failure = get(&object, "screenshotOnRunFailure", source);
        config.retries = get(&object, "retries", source);

        if let Some(e2e) = property(&object, "e2e", source).filter(|v| v.kind() == "object") {
            if config.base_url.is_none() {
                config.base_url = get(&e2e, "baseUrl", source);
            }
            config.spec_pattern = get(&e2e, "specPattern", source);
        }
        config
    }

    fn has_local_base_url(&self) -> bool {
        self.base_url
            .as_deref()
            .is_some_and(|url| url.contains("localhost") || url.contains("127.0.0.1"))
    }

    /// Render the equivalent Playwright config file
    pub fn to_playwright(&self) -> String {
        let mut lines: Vec<String> = [
            "import { defineConfig, devices } from '@playwright/test';",
            "",
            "/**",
            " * Playwright configuration - migrated from Cypress",
            " * @see https://playwright.dev/docs/test-configuration",
            " */",
            "export default defineConfig({",
            "  testDir: './tests',",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        lines.push(format!(
            "  timeout: {},",
            self.default_timeout.as_deref().unwrap_or("30000")
        ));
        if let Some(retries) = &self.retries {
            lines.push(format!("  retries: {retries},"));
        }
        lines.push("  reporter: 'html',".to_string());
        lines.push("  use: {".to_string());
        if let Some(url) = &self.base_url {
            lines.push(format!("    baseURL: {url},"));
        }
        if let (Some(width), Some(height)) = (&self.viewport_width, &self.viewport_height) {
            lines.push(format!("    viewport: {{ width: {width}, height: {height} }},"));
        }
        let video = match self.video.as_deref() {
            Some("true") => "on",
            Some("false") => "off",
            _ => "on-first-retry",
        };
        lines.push(format!("    video: '{video}',"));
        if self.screenshot_on_failure.as_deref() == Some("true") {
            lines.push("    screenshot: 'only-on-failure',".to_string());
        }
        lines.push("    trace: 'on-first-retry',".to_string());
        lines.push("  },".to_string());

        for line in [
            "  projects: [",
            "    {",
            "      name: 'chromium',",
            "      use: { ...devices['Desktop Chrome'] },",
            "    },",
            "    // Uncomment to add more browsers:",
            "    // {",
            "    //   name: 'firefox',",
            "    //   use: { ...devices['Desktop Firefox'] },",
            "    // },",
            "    // {",
            "    //   name: 'webkit',",
            "    //   use: { ...devices['Desktop Safari'] },",
            "    // },",
            "  ],",
        ] {
            lines.push(line.to_string());
        }

        if let Some(url) = self.base_url.as_deref().filter(|_| self.has_local_base_url()) {
            lines.push("  // Configure web server to start before tests".to_string());
            lines.push("  // webServer: {".to_string());
            lines.push("  //   command: 'npm run start',".to_string());
            lines.push(format!("  //   url: {url},"));
            lines.push("  //   reuseExistingServer: !process.env.CI,".to_string());
            lines.push("  // },".to_string());
        }

        lines.push("});".to_string());
        lines.join("\n")
    }
}

/// Migrate a Cypress config file's text
///
/// `None` when the text does not look like a Cypress config at all.
pub fn migrate_config(source: &str, language: LanguageId) -> Result<Option<String>> {
    if !source.contains("cypress") && !source.contains("defineConfig") {
        return Ok(None);
    }
    let tree = AdapterRegistry::new().parse(source, language)?;
    let config = CypressConfig::extract(tree.root_node(), source);
    debug!(?config, "extracted cypress config");
    Ok(Some(config.to_playwright()))
}
